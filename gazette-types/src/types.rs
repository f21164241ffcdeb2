//! Briefing data model.
//!
//! Wire names are camelCase because these shapes double as the JSON schema
//! handed to the provider's structured-output mode; the model emits
//! `titleLocal`, `viralTitles`, and so on.

use crate::error::GenerationErrorKind;
use serde::{Deserialize, Serialize};

/// A single bilingual news item.
///
/// Every field defaults to empty so a repaired-but-truncated response still
/// deserializes; semantic checks happen in the generator, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Headline in the configured local language.
    #[serde(default)]
    pub title_local: String,
    /// Headline in English.
    #[serde(default)]
    pub title_en: String,
    /// Summary in the configured local language.
    #[serde(default)]
    pub summary_local: String,
    /// Summary in English.
    #[serde(default)]
    pub summary_en: String,
    /// Model-supplied source URL. Not verified beyond a placeholder check.
    #[serde(default)]
    pub source_url: String,
    /// Human-readable source name.
    #[serde(default)]
    pub source_name: String,
}

/// The contracted output of one successful generation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingPayload {
    /// Short attention-grabbing titles, intended cardinality 3.
    #[serde(default)]
    pub viral_titles: Vec<String>,
    /// Medical-topic viral titles, intended cardinality 3.
    #[serde(default)]
    pub medical_viral_titles: Vec<String>,
    /// General news items, intended cardinality 6.
    #[serde(default)]
    pub general_news: Vec<NewsItem>,
    /// Medical news items, intended cardinality 6.
    #[serde(default)]
    pub medical_news: Vec<NewsItem>,
    /// Echo of the requested date (YYYY-MM-DD).
    #[serde(default)]
    pub date: String,
}

impl BriefingPayload {
    /// Whether at least one of the two news arrays is non-empty.
    ///
    /// This is the generator's terminal success condition.
    #[must_use]
    pub fn has_news(&self) -> bool {
        !self.general_news.is_empty() || !self.medical_news.is_empty()
    }
}

/// Per-request credential overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialOverrides {
    /// API key for the LLM provider.
    pub api_key: Option<String>,
    /// Provider endpoint root.
    pub base_url: Option<String>,
}

/// One request for a briefing, constructed once per generation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingRequest {
    /// Calendar date the briefing should cover (YYYY-MM-DD).
    pub target_date: String,
    /// Overrides the resolved primary model when set.
    pub model_override: Option<String>,
    /// Overrides resolved credentials when set.
    pub credentials: Option<CredentialOverrides>,
}

impl BriefingRequest {
    /// Create a request for the given date with no overrides.
    #[must_use]
    pub fn for_date(target_date: impl Into<String>) -> Self {
        Self {
            target_date: target_date.into(),
            model_override: None,
            credentials: None,
        }
    }
}

/// A model identifier returned by the connectivity prober.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider-side model identifier.
    pub id: String,
    /// Optional display name, when the provider reports one.
    pub display_name: Option<String>,
}

impl ModelDescriptor {
    /// Descriptor with an id only.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }
}

/// One generation call handed to a [`crate::Provider`].
///
/// Providers map this to their wire format; the raw text of the model's
/// answer comes back in [`GenerationResult`] for the pipeline to repair
/// and parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCall {
    /// Model identifier for this call.
    pub model: String,
    /// System instruction (editorial task and schema expectations).
    pub system: String,
    /// User instruction embedding the target date.
    pub user: String,
    /// JSON schema for structured output, when the mode supports one.
    pub response_schema: Option<serde_json::Value>,
    /// Attach the provider's web-search tool when the model supports it.
    pub enable_search: bool,
}

/// Raw outcome of one successful provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Raw model output text, before any repair or parsing.
    pub text: String,
    /// Model that actually served the call.
    pub model: String,
}

/// Outcome of one attempt, kept for the failure trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The attempt produced a validated payload.
    Succeeded,
    /// The attempt failed with the given cause.
    Failed(GenerationErrorKind),
}

/// One provider call in the fallback state machine.
///
/// Ephemeral: created per call, retained only in the attempt trace that a
/// terminal [`crate::GenerationError`] carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAttempt {
    /// Model used for this attempt.
    pub model_id: String,
    /// Zero-based retry level within the same model.
    pub retry_level: u32,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
}
