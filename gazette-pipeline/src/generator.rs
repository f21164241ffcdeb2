//! The fallback generation state machine.
//!
//! One generation cycle walks a fixed ordered model chain: the primary
//! model gets a bounded exponential-backoff budget for rate limits, every
//! later model one shot, and non-transient failures (empty body, schema
//! violation, safety refusal) always advance to the next model
//! immediately. A bounded loop, not recursion: the maximum call count is
//! readable off the configuration.

use crate::prompt::{PromptConfig, response_schema};
use crate::repair::repair;
use gazette_types::{
    AttemptOutcome, BriefingPayload, BriefingRequest, GenerationAttempt, GenerationCall,
    GenerationError, GenerationErrorKind, Provider, ProviderError,
};
use std::time::Duration;

/// Rate-limit retries the primary model gets before falling back.
pub const MAX_RETRIES: u32 = 3;

/// Model-id prefixes known to accept web-search grounding.
const SEARCH_CAPABLE_PREFIXES: &[&str] = &["gemini-", "gpt-5", "gpt-4o-search"];

/// Static configuration for a [`BriefingGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Primary model, used unless the request overrides it.
    pub primary_model: String,
    /// Fallback models, attempted strictly in order after the primary.
    pub fallback_models: Vec<String>,
    /// Rate-limit retry ceiling for the primary model.
    pub max_retries: u32,
    /// Ask for web-search grounding on models that support it.
    pub enable_search: bool,
    /// Prompt configuration.
    pub prompt: PromptConfig,
    /// Base unit for the `2^(level+1)` backoff. One second in production;
    /// tests shrink it so retry paths run instantly.
    pub backoff_unit: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            primary_model: String::new(),
            fallback_models: Vec::new(),
            max_retries: MAX_RETRIES,
            enable_search: true,
            prompt: PromptConfig::default(),
            backoff_unit: Duration::from_secs(1),
        }
    }
}

/// Generates validated briefing payloads over any [`Provider`].
pub struct BriefingGenerator<P: Provider> {
    provider: P,
    config: GeneratorConfig,
}

impl<P: Provider> BriefingGenerator<P> {
    /// Create a generator from a provider and configuration.
    pub fn new(provider: P, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    /// Run one full generation cycle for the request.
    ///
    /// Returns the first validated payload, or a terminal
    /// [`GenerationError`] carrying the last cause and the full attempt
    /// trace once the model chain is exhausted.
    pub async fn generate(
        &self,
        request: &BriefingRequest,
    ) -> Result<BriefingPayload, GenerationError> {
        let primary = request
            .model_override
            .as_deref()
            .unwrap_or(&self.config.primary_model);

        let mut chain = vec![primary.to_string()];
        chain.extend(self.config.fallback_models.iter().cloned());

        let mut attempts: Vec<GenerationAttempt> = Vec::new();
        let mut last_failure = (
            GenerationErrorKind::Provider,
            "no models configured".to_string(),
        );

        for (model_index, model) in chain.iter().enumerate() {
            // Only the primary model carries the rate-limit retry budget;
            // fallbacks get one shot each so the total call count stays
            // bounded at (max_retries + 1) + fallback count.
            let retry_budget = if model_index == 0 {
                self.config.max_retries
            } else {
                0
            };

            let mut level = 0u32;
            loop {
                let call = self.build_call(model, &request.target_date);
                tracing::debug!(model = %model, level, "generation attempt");

                let failure = match self.provider.generate(call).await {
                    Ok(result) => match parse_payload(&result.text, &request.target_date) {
                        Ok(payload) => {
                            attempts.push(GenerationAttempt {
                                model_id: model.clone(),
                                retry_level: level,
                                outcome: AttemptOutcome::Succeeded,
                            });
                            tracing::debug!(model = %model, attempts = attempts.len(),
                                "briefing validated");
                            return Ok(payload);
                        }
                        Err(violation) => violation,
                    },
                    Err(provider_err) => provider_err,
                };

                let kind = failure.kind();
                attempts.push(GenerationAttempt {
                    model_id: model.clone(),
                    retry_level: level,
                    outcome: AttemptOutcome::Failed(kind),
                });
                last_failure = (kind, failure.to_string());

                if failure.is_rate_limited() && level < retry_budget {
                    let delay = backoff_delay(self.config.backoff_unit, level);
                    tracing::warn!(model = %model, level, delay_ms = delay.as_millis() as u64,
                        "rate limited, backing off");
                    tokio::time::sleep(delay).await;
                    level += 1;
                    continue;
                }

                // Non-transient failure, or retry budget spent: next model.
                tracing::warn!(model = %model, cause = %last_failure.1, "advancing to next model");
                break;
            }
        }

        Err(GenerationError::Exhausted {
            kind: last_failure.0,
            message: last_failure.1,
            attempts,
        })
    }

    fn build_call(&self, model: &str, target_date: &str) -> GenerationCall {
        GenerationCall {
            model: model.to_string(),
            system: self.config.prompt.system_instruction(),
            user: self.config.prompt.user_instruction(target_date),
            response_schema: Some(response_schema()),
            enable_search: self.config.enable_search && model_supports_search(model),
        }
    }
}

/// `2^(level+1)` seconds, scaled by the configured unit.
fn backoff_delay(unit: Duration, level: u32) -> Duration {
    unit * 2u32.saturating_pow(level + 1)
}

/// Whether the model is known to accept web-search grounding.
fn model_supports_search(model: &str) -> bool {
    SEARCH_CAPABLE_PREFIXES.iter().any(|p| model.starts_with(p))
}

/// Repair, parse, and validate one raw model answer.
pub(crate) fn parse_payload(
    raw: &str,
    target_date: &str,
) -> Result<BriefingPayload, ProviderError> {
    let repaired = repair(raw);
    let value: serde_json::Value = serde_json::from_str(&repaired)
        .map_err(|e| ProviderError::SchemaViolation(format!("unparseable after repair: {e}")))?;
    let mut payload: BriefingPayload = serde_json::from_value(value)
        .map_err(|e| ProviderError::SchemaViolation(format!("wrong field types: {e}")))?;

    if !payload.has_news() {
        return Err(ProviderError::SchemaViolation(
            "no news items in either category".into(),
        ));
    }

    if let Some(url) = payload
        .general_news
        .first()
        .or_else(|| payload.medical_news.first())
        .map(|item| item.source_url.as_str())
        && (url.contains("example.com") || url == "String")
    {
        return Err(ProviderError::SchemaViolation(format!(
            "placeholder source URL: {url}"
        )));
    }

    if payload.date.is_empty() {
        payload.date = target_date.to_string();
    }
    Ok(payload)
}
