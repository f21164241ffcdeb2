#![deny(missing_docs)]
//! Configuration resolution for the gazette pipeline.
//!
//! Merges per-request overrides with process environment and built-in
//! defaults, normalizes user-supplied base URLs to the provider's path
//! convention, and percent-encodes credential values for HTTP header
//! transport.

mod url;

pub use url::normalize_base_url;

use gazette_types::{ConfigError, CredentialOverrides};
use std::borrow::Cow;

/// Environment variable holding the LLM provider API key.
pub const ENV_API_KEY: &str = "GAZETTE_API_KEY";
/// Environment variable overriding the provider base URL.
pub const ENV_BASE_URL: &str = "GAZETTE_BASE_URL";
/// Environment variable overriding the primary model.
pub const ENV_MODEL: &str = "GAZETTE_MODEL";

/// Built-in base URL used when neither override nor environment sets one.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Built-in primary model used when neither override nor environment sets one.
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Fully resolved provider configuration for one generation cycle.
///
/// Constructed exactly once per cycle and passed into the pipeline; there
/// is no process-wide client singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Provider API key.
    pub api_key: String,
    /// Normalized provider endpoint root.
    pub base_url: String,
    /// Primary model identifier.
    pub model_id: String,
}

/// Resolve configuration from overrides, environment, and defaults.
///
/// Precedence per field: explicit override > environment > built-in
/// constant. There is no built-in API key, so a cycle with neither an
/// override nor `GAZETTE_API_KEY` fails with [`ConfigError::MissingApiKey`].
pub fn resolve(
    overrides: Option<&CredentialOverrides>,
    model_override: Option<&str>,
) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(overrides, model_override, |name| {
        std::env::var(name).ok()
    })
}

/// [`resolve`] with an injected environment lookup, for tests.
pub fn resolve_with(
    overrides: Option<&CredentialOverrides>,
    model_override: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    let api_key = overrides
        .and_then(|o| o.api_key.clone())
        .filter(|k| !k.trim().is_empty())
        .or_else(|| env(ENV_API_KEY).filter(|k| !k.trim().is_empty()))
        .ok_or(ConfigError::MissingApiKey)?;

    let base_url = overrides
        .and_then(|o| o.base_url.clone())
        .filter(|u| !u.trim().is_empty())
        .or_else(|| env(ENV_BASE_URL).filter(|u| !u.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let model_id = model_override
        .map(str::to_string)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| env(ENV_MODEL).filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    Ok(ResolvedConfig {
        api_key,
        base_url: normalize_base_url(&base_url),
        model_id,
    })
}

/// Percent-encode a credential or identifier for use as an HTTP header value.
///
/// Raw keys and model names may contain octets outside the header-safe
/// set (non-Latin script in particular); the receiving side decodes with
/// [`decode_header_value`].
#[must_use]
pub fn encode_header_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Reverse of [`encode_header_value`]. Returns the input unchanged when it
/// is not valid percent-encoding.
#[must_use]
pub fn decode_header_value(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => value.to_string(),
    }
}
