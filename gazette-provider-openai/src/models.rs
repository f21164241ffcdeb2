//! Model-listing normalization.
//!
//! Gateways answer `GET /models` in three observed shapes: `{data:[…]}`
//! (OpenAI proper), `{models:[…]}`, or a bare array. Items are objects with
//! `id` or `name`, or plain strings. Everything funnels through one
//! normalization function so call sites never shape-sniff.

use gazette_types::ModelDescriptor;

/// Normalize any of the known listing shapes to a sorted descriptor list.
#[must_use]
pub fn normalize_model_list(body: &serde_json::Value) -> Vec<ModelDescriptor> {
    let items = body["data"]
        .as_array()
        .or_else(|| body["models"].as_array())
        .or_else(|| body.as_array());

    let mut models: Vec<ModelDescriptor> = items
        .map(|arr| arr.iter().filter_map(descriptor_from_item).collect())
        .unwrap_or_default();

    models.sort();
    models
}

fn descriptor_from_item(item: &serde_json::Value) -> Option<ModelDescriptor> {
    if let Some(id) = item.as_str() {
        return Some(ModelDescriptor::new(id));
    }
    let id = item["id"].as_str().or_else(|| item["name"].as_str())?;
    let display_name = item["display_name"]
        .as_str()
        .or_else(|| item["name"].as_str())
        .filter(|name| *name != id)
        .map(str::to_string);
    Some(ModelDescriptor {
        id: id.to_string(),
        display_name,
    })
}

/// Whether a response looks like an HTML page rather than an API answer.
///
/// A base URL pointing at a provider's dashboard instead of its API root is
/// the single most common misconfiguration; it deserves a distinct error so
/// the UI can suggest a URL fix.
pub(crate) fn looks_like_html(content_type: Option<&str>, body: &str) -> bool {
    if let Some(ct) = content_type
        && ct.to_ascii_lowercase().contains("text/html")
    {
        return true;
    }
    let head = body.trim_start();
    head.starts_with("<!DOCTYPE") || head.starts_with("<html")
}
