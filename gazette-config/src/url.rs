//! Base-URL normalization.
//!
//! OpenAI-compatible gateways expect requests under a versioned path
//! (usually `/v1`), which end users routinely omit or duplicate when they
//! paste an endpoint into the settings form. Normalization is idempotent:
//! feeding its own output back in is a no-op.

/// Path markers that indicate the URL already targets an API root and must
/// not receive another `/v1` suffix.
const PATH_MARKERS: &[&str] = &["googleapis.com", "/openai", "/api"];

/// Normalize a user-supplied base URL to the provider path convention.
///
/// Trims whitespace, prepends `https://` when no scheme is present, strips
/// one trailing slash, and appends `/v1` unless the URL already ends in a
/// version segment or carries a known provider path marker.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let stripped = with_scheme
        .strip_suffix('/')
        .unwrap_or(&with_scheme)
        .to_string();

    if ends_in_version_segment(&stripped) || has_path_marker(&stripped) {
        stripped
    } else {
        format!("{stripped}/v1")
    }
}

/// Whether the URL already ends in a recognized version path segment
/// (`/v1` .. `/v9`, or a suffixed form like `/v1beta`).
fn ends_in_version_segment(url: &str) -> bool {
    let Some(last) = url.rsplit('/').next() else {
        return false;
    };
    let mut chars = last.chars();
    if chars.next() != Some('v') {
        return false;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return false;
    }
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return false;
    }
    // Anything after the digits must be a plain suffix like "beta".
    rest[digits.len()..].chars().all(|c| c.is_ascii_alphabetic())
}

fn has_path_marker(url: &str) -> bool {
    PATH_MARKERS.iter().any(|m| url.contains(m))
}
