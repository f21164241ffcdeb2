#![deny(missing_docs)]
//! Core types for the gazette briefing pipeline.
//!
//! This crate is the lingua franca of the workspace: the briefing data
//! model, the error taxonomy, and the [`Provider`] trait that every LLM
//! backend implements. Provider crates convert to/from these types at
//! their wire boundary; the pipeline crate never sees provider JSON.

pub mod error;
pub mod provider;
pub mod types;

pub use error::{
    ConfigError, ConnectivityError, DispatchError, GenerationError, GenerationErrorKind,
    ProviderError,
};
pub use provider::{Provider, check_connectivity};
pub use types::{
    AttemptOutcome, BriefingPayload, BriefingRequest, CredentialOverrides, GenerationAttempt,
    GenerationCall, GenerationResult, ModelDescriptor, NewsItem,
};
