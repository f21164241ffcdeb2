#![deny(missing_docs)]
//! The resilient briefing-generation pipeline.
//!
//! Orchestrates prompt construction, structured-output schemas, JSON
//! repair, and the retry/fallback decision tree over any
//! [`gazette_types::Provider`], plus the session guard and the daily
//! trigger decision the dashboard feeds from its clock tick.

pub mod generator;
pub mod prompt;
pub mod repair;
pub mod schedule;
pub mod session;

pub use generator::{BriefingGenerator, GeneratorConfig, MAX_RETRIES};
pub use prompt::{NEWS_PER_CATEGORY, PromptConfig, TITLES_PER_CATEGORY, response_schema};
pub use repair::repair;
pub use schedule::DailySchedule;
pub use session::BriefingSession;
