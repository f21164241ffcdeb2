#![deny(missing_docs)]
//! # gazette — umbrella crate
//!
//! Single import surface for the briefing system. Re-exports the member
//! crates behind feature flags, plus a `prelude` for the happy path.

pub use gazette_types;

#[cfg(feature = "core")]
pub use gazette_config;
#[cfg(feature = "mail")]
pub use gazette_mail;
#[cfg(feature = "core")]
pub use gazette_pipeline;
#[cfg(feature = "provider-gemini")]
pub use gazette_provider_gemini;
#[cfg(feature = "provider-openai")]
pub use gazette_provider_openai;

/// Happy-path imports for composing a briefing dashboard backend.
pub mod prelude {
    pub use gazette_types::{
        BriefingPayload, BriefingRequest, ConfigError, ConnectivityError, DispatchError,
        GenerationError, ModelDescriptor, NewsItem, Provider, ProviderError, check_connectivity,
    };

    #[cfg(feature = "core")]
    pub use gazette_config::{ResolvedConfig, normalize_base_url, resolve};
    #[cfg(feature = "core")]
    pub use gazette_pipeline::{
        BriefingGenerator, BriefingSession, DailySchedule, GeneratorConfig, PromptConfig, repair,
    };

    #[cfg(feature = "provider-gemini")]
    pub use gazette_provider_gemini::Gemini;
    #[cfg(feature = "provider-openai")]
    pub use gazette_provider_openai::OpenAiCompatible;

    #[cfg(feature = "mail")]
    pub use gazette_mail::{RelayClient, parse_recipients, render, subject_for};
}
