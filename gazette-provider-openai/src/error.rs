//! Internal error helpers for mapping HTTP/reqwest failures to the
//! pipeline's error taxonomy.

use std::time::Duration;

use gazette_types::{ConnectivityError, ProviderError};

/// Map an HTTP status from a generation call to a [`ProviderError`].
pub(crate) fn map_generation_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Auth(body.to_string()),
        // 429 sometimes carries "retry after N seconds" in the body text
        429 => ProviderError::RateLimited {
            retry_after: parse_retry_after(body),
        },
        _ => ProviderError::InvalidResponse(format!("HTTP {status}: {body}")),
    }
}

/// Map an HTTP status from the listing probe to a [`ConnectivityError`].
pub(crate) fn map_listing_status(status: reqwest::StatusCode, body: &str) -> ConnectivityError {
    match status.as_u16() {
        401 | 403 => ConnectivityError::Auth(body.to_string()),
        _ => ConnectivityError::Unreachable(format!("HTTP {status}: {body}")),
    }
}

/// Best-effort parse of "retry after N seconds" from an error body.
fn parse_retry_after(body: &str) -> Option<Duration> {
    let lower = body.to_lowercase();
    let idx = lower.find("retry after ")?;
    let after = &lower[idx + 12..];
    let num: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    num.parse::<u64>().ok().map(Duration::from_secs)
}

/// Map a [`reqwest::Error`] from a generation call.
pub(crate) fn map_generation_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Network(err.to_string())
}
