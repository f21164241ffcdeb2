//! Provider trait for LLM backends.
//!
//! The [`Provider`] trait uses RPITIT (return-position `impl Trait` in
//! traits) and is intentionally NOT object-safe. The generator is generic
//! over `P: Provider`; there is no dynamic provider dispatch in the
//! pipeline.

use crate::error::{ConnectivityError, ProviderError};
use crate::types::{GenerationCall, GenerationResult, ModelDescriptor};
use std::future::Future;

/// LLM provider interface.
///
/// Each provider family (OpenAI-compatible gateways, Gemini) implements
/// this trait. Wire-format differences — request shape, listing shape,
/// search-tool attachment — live entirely inside the implementation.
pub trait Provider: Send + Sync {
    /// Issue one generation call and return the raw model text.
    ///
    /// Implementations surface empty bodies and provider-signaled safety
    /// refusals as [`ProviderError`] variants rather than empty strings;
    /// syntactic repair and parsing of the text is the caller's job.
    fn generate(
        &self,
        call: GenerationCall,
    ) -> impl Future<Output = Result<GenerationResult, ProviderError>> + Send;

    /// List the models the endpoint offers.
    ///
    /// Used as the connectivity probe: a reachable endpoint that reports
    /// zero models is treated as misconfigured by the caller.
    fn list_models(
        &self,
    ) -> impl Future<Output = Result<Vec<ModelDescriptor>, ConnectivityError>> + Send;
}

/// Run the connectivity check against a provider.
///
/// Defined as successful if and only if the listing call returns at least
/// one model; an empty list distinguishes "reachable but misconfigured"
/// from "working".
pub async fn check_connectivity<P: Provider>(provider: &P) -> bool {
    match provider.list_models().await {
        Ok(models) => !models.is_empty(),
        Err(_) => false,
    }
}
