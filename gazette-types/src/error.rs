//! Error taxonomy for the briefing pipeline.
//!
//! Per-call provider failures ([`ProviderError`]) feed the generator's
//! fallback state machine; everything that survives the full fallback chain
//! surfaces as a terminal [`GenerationError`] carrying the attempt trace.

use crate::types::GenerationAttempt;
use std::time::Duration;
use thiserror::Error;

/// Configuration resolution errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was resolvable from override, environment, or default.
    #[error("no API key configured (set GAZETTE_API_KEY or pass an override)")]
    MissingApiKey,

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Connectivity-probe errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConnectivityError {
    /// Endpoint unreachable at the network level (after relay fallback).
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered with HTML where JSON was expected — the base
    /// URL almost certainly points at a dashboard page, not an API root.
    #[error("endpoint returned HTML, not JSON; the base URL likely needs an API path")]
    WrongEndpoint,

    /// The listing call succeeded but returned no models.
    #[error("endpoint reachable but reported no models")]
    NoModels,

    /// Credentials were rejected.
    #[error("auth failed: {0}")]
    Auth(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors from a single LLM provider call.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider returned HTTP 429.
    #[error("rate limited")]
    RateLimited {
        /// Retry delay parsed from the provider's error body, if any.
        retry_after: Option<Duration>,
    },

    /// Provider returned a response with no usable text content.
    #[error("empty response body")]
    EmptyBody,

    /// Provider declined on content-policy grounds.
    #[error("safety refusal: {0}")]
    SafetyRefusal(String),

    /// Response parsed but required fields are missing, or JSON repair
    /// could not produce a parseable document.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// Authentication or authorization failed.
    #[error("auth failed: {0}")]
    Auth(String),

    /// Network-level failure (no HTTP status received).
    #[error("network error: {0}")]
    Network(String),

    /// Response was not in any recognized shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Whether this failure is a rate limit (retried with backoff on the
    /// same model before any fallback transition).
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::RateLimited { .. })
    }

    /// The terminal-error kind this per-call failure maps to.
    #[must_use]
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            ProviderError::RateLimited { .. } => GenerationErrorKind::RateLimited,
            ProviderError::EmptyBody => GenerationErrorKind::EmptyBody,
            ProviderError::SafetyRefusal(_) => GenerationErrorKind::SafetyRefusal,
            ProviderError::SchemaViolation(_) => GenerationErrorKind::SchemaViolation,
            _ => GenerationErrorKind::Provider,
        }
    }
}

/// Why a generation cycle terminally failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// Every model in the chain stayed rate-limited through its budget.
    RateLimited,
    /// Last failure was an empty response body.
    EmptyBody,
    /// Last failure was a missing-fields or unparseable response.
    SchemaViolation,
    /// Last failure was a content-policy refusal.
    SafetyRefusal,
    /// Last failure was a network/auth/other provider error.
    Provider,
}

/// Terminal generation failure, after the fallback policy is exhausted.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The fallback chain is exhausted. Carries the last underlying error
    /// message and the full per-call attempt trace for operator display.
    #[error("all models failed ({kind:?}): {message}")]
    Exhausted {
        /// Cause of the final attempt's failure.
        kind: GenerationErrorKind,
        /// The last underlying error's message, verbatim.
        message: String,
        /// Every (model, retry level) pair tried, in order.
        attempts: Vec<GenerationAttempt>,
    },

    /// A generation cycle is already in flight for this session.
    #[error("a generation is already running")]
    AlreadyRunning,

    /// Configuration could not be resolved before the first call.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GenerationError {
    /// The attempt trace, when this failure carries one.
    #[must_use]
    pub fn attempts(&self) -> &[GenerationAttempt] {
        match self {
            GenerationError::Exhausted { attempts, .. } => attempts,
            _ => &[],
        }
    }
}

/// Email-relay dispatch errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The relay rejected the send. Message is the relay's own error text,
    /// passed through unmodified for operator diagnosis.
    #[error("relay rejected send (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status the relay answered with.
        status: u16,
        /// Relay error body, verbatim.
        message: String,
    },

    /// The relay was unreachable.
    #[error("relay unreachable: {0}")]
    Unreachable(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
