//! Daily trigger decision logic.
//!
//! The dashboard feeds this from a coarse periodic tick (every ten seconds
//! or so). The decision is an at-most-once-per-day comparison against a
//! target wall-clock time and a last-run date marker, tolerant of the tick
//! interval's granularity — not a precise timer.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// At-most-once-per-day trigger state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    /// Local wall-clock time after which today's run is due.
    pub trigger_time: NaiveTime,
    last_run: Option<NaiveDate>,
}

impl DailySchedule {
    /// Schedule that fires at the given local time each day.
    #[must_use]
    pub fn at(trigger_time: NaiveTime) -> Self {
        Self {
            trigger_time,
            last_run: None,
        }
    }

    /// Whether a run is due at `now`.
    ///
    /// True from the trigger time until the end of the day, unless today
    /// already ran. Coarse ticks can therefore miss the exact minute and
    /// still fire on the next check.
    #[must_use]
    pub fn due(&self, now: NaiveDateTime) -> bool {
        now.time() >= self.trigger_time && self.last_run != Some(now.date())
    }

    /// Record that the run for `now`'s date happened.
    pub fn mark_run(&mut self, now: NaiveDateTime) {
        self.last_run = Some(now.date());
    }
}
