//! Request/response mapping for the Chat Completions wire format.
//!
//! Reference: <https://platform.openai.com/docs/api-reference/chat>

use gazette_types::{GenerationCall, ProviderError};

/// Build the Chat Completions request body for one generation call.
#[must_use]
pub(crate) fn to_chat_request(call: &GenerationCall) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": call.model,
        "messages": [
            { "role": "system", "content": call.system },
            { "role": "user", "content": call.user },
        ],
    });

    // Structured output: strict json_schema when a schema is attached.
    if let Some(schema) = &call.response_schema {
        body["response_format"] = serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": "briefing",
                "schema": schema,
                "strict": true,
            },
        });
    }

    // Search grounding, for gateways/models that accept it on chat completions.
    if call.enable_search {
        body["web_search_options"] = serde_json::json!({});
    }

    body
}

/// Pull the model's text out of a Chat Completions response.
///
/// Empty bodies and provider-signaled refusals become [`ProviderError`]s
/// here so the generator's state machine sees them as distinct outcomes.
pub(crate) fn extract_text(body: &serde_json::Value) -> Result<String, ProviderError> {
    let choice = body["choices"]
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing 'choices' array in response".into())
        })?;

    let message = &choice["message"];

    if let Some(refusal) = message["refusal"].as_str()
        && !refusal.is_empty()
    {
        return Err(ProviderError::SafetyRefusal(refusal.to_string()));
    }
    if choice["finish_reason"].as_str() == Some("content_filter") {
        return Err(ProviderError::SafetyRefusal("content filtered".into()));
    }

    match message["content"].as_str() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(ProviderError::EmptyBody),
    }
}
