//! Request/response mapping for the `generateContent` wire format.
//!
//! Reference: <https://ai.google.dev/api/generate-content>

use gazette_types::{GenerationCall, ProviderError};

/// Build the `generateContent` request body for one generation call.
///
/// `responseSchema` and the `google_search` tool are mutually exclusive on
/// this API; when search grounding is on, the schema expectations ride in
/// the system instruction instead and the response is repaired/validated
/// downstream like any other text answer.
#[must_use]
pub(crate) fn to_generate_request(call: &GenerationCall) -> serde_json::Value {
    let mut body = serde_json::json!({
        "systemInstruction": { "parts": [{ "text": call.system }] },
        "contents": [
            { "role": "user", "parts": [{ "text": call.user }] },
        ],
    });

    if call.enable_search {
        body["tools"] = serde_json::json!([{ "google_search": {} }]);
    } else if let Some(schema) = &call.response_schema {
        body["generationConfig"] = serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": to_gemini_schema(schema),
        });
    }

    body
}

/// Convert a JSON-schema fragment to Gemini's OpenAPI-flavored schema.
///
/// Gemini wants uppercase `type` values and rejects `additionalProperties`.
pub(crate) fn to_gemini_schema(schema: &serde_json::Value) -> serde_json::Value {
    match schema {
        serde_json::Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                match key.as_str() {
                    "additionalProperties" => continue,
                    "type" => {
                        if let Some(t) = value.as_str() {
                            out.insert(key.clone(), t.to_uppercase().into());
                        }
                    }
                    _ => {
                        out.insert(key.clone(), to_gemini_schema(value));
                    }
                }
            }
            serde_json::Value::Object(out)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(to_gemini_schema).collect())
        }
        other => other.clone(),
    }
}

/// Pull the model's text out of a `generateContent` response.
///
/// Accepts both the canonical `candidates` shape and the bare `{text}`
/// shape some proxy gateways answer with.
pub(crate) fn extract_text(body: &serde_json::Value) -> Result<String, ProviderError> {
    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(ProviderError::SafetyRefusal(reason.to_string()));
    }

    // Bare gateway shape.
    if let Some(text) = body["text"].as_str() {
        return if text.trim().is_empty() {
            Err(ProviderError::EmptyBody)
        } else {
            Ok(text.to_string())
        };
    }

    let candidate = body["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or(ProviderError::EmptyBody)?;

    if let Some(reason) = candidate["finishReason"].as_str()
        && matches!(reason, "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST")
    {
        return Err(ProviderError::SafetyRefusal(reason.to_string()));
    }

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ProviderError::EmptyBody)
    } else {
        Ok(text)
    }
}
