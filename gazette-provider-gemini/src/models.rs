//! Model-listing parsing for the Gemini API.
//!
//! The listing answers as `{"models": [{"name": "models/gemini-…",
//! "displayName": "…"}]}`; the `models/` resource prefix is stripped so
//! identifiers line up with what `generateContent` expects.

use gazette_types::ModelDescriptor;

/// Whether a response looks like an HTML page rather than an API answer.
///
/// A proxy base URL pointing at a dashboard page instead of the API root
/// deserves a URL-correction hint, not a JSON parse error.
pub(crate) fn looks_like_html(content_type: Option<&str>, body: &str) -> bool {
    if let Some(ct) = content_type
        && ct.to_ascii_lowercase().contains("text/html")
    {
        return true;
    }
    let head = body.trim_start();
    head.starts_with("<!DOCTYPE") || head.starts_with("<html")
}

/// Parse the Gemini listing body to a sorted descriptor list.
#[must_use]
pub(crate) fn parse_model_list(body: &serde_json::Value) -> Vec<ModelDescriptor> {
    let mut models: Vec<ModelDescriptor> = body["models"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|item| {
                    let name = item["name"].as_str()?;
                    let id = name.strip_prefix("models/").unwrap_or(name);
                    Some(ModelDescriptor {
                        id: id.to_string(),
                        display_name: item["displayName"].as_str().map(str::to_string),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    models.sort();
    models
}
