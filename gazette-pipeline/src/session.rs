//! Per-dashboard-session generation state.
//!
//! Owns the only two pieces of shared mutable state in the system: the
//! "a generation is in flight" flag and the most recent successful
//! payload. Both are owned here exclusively; nothing else touches them.

use crate::generator::{BriefingGenerator, GeneratorConfig};
use gazette_types::{BriefingPayload, BriefingRequest, GenerationError, Provider};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// One UI session's generation state.
///
/// A second `generate` while one is running — manual click racing the
/// daily schedule, or double-click — is rejected up front rather than
/// issuing duplicate provider calls against the same credentials.
pub struct BriefingSession<P: Provider> {
    generator: BriefingGenerator<P>,
    in_flight: AtomicBool,
    last_payload: Mutex<Option<BriefingPayload>>,
}

impl<P: Provider> BriefingSession<P> {
    /// Create a session around a provider and generator configuration.
    pub fn new(provider: P, config: GeneratorConfig) -> Self {
        Self {
            generator: BriefingGenerator::new(provider, config),
            in_flight: AtomicBool::new(false),
            last_payload: Mutex::new(None),
        }
    }

    /// Run one generation cycle, guarded against concurrent triggers.
    pub async fn generate(
        &self,
        request: &BriefingRequest,
    ) -> Result<BriefingPayload, GenerationError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(GenerationError::AlreadyRunning);
        }

        let result = self.generator.generate(request).await;
        if let Ok(payload) = &result {
            *self.last_payload.lock().unwrap() = Some(payload.clone());
        }
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    /// The most recent successful payload, if any.
    ///
    /// Survives failed dispatches: a retried send reuses this without
    /// regeneration.
    pub fn last_payload(&self) -> Option<BriefingPayload> {
        self.last_payload.lock().unwrap().clone()
    }

    /// Whether a generation cycle is currently running.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}
