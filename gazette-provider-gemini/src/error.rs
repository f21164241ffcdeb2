//! Error mapping for the Gemini API.

use std::time::Duration;

use gazette_types::{ConnectivityError, ProviderError};

/// Map an HTTP status from `generateContent` to a [`ProviderError`].
pub(crate) fn map_generation_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        400 if body.contains("API key") => ProviderError::Auth(body.to_string()),
        401 | 403 => ProviderError::Auth(body.to_string()),
        429 => ProviderError::RateLimited {
            retry_after: parse_retry_delay(body),
        },
        _ => ProviderError::InvalidResponse(format!("HTTP {status}: {body}")),
    }
}

/// Map an HTTP status from the listing probe to a [`ConnectivityError`].
pub(crate) fn map_listing_status(status: reqwest::StatusCode, body: &str) -> ConnectivityError {
    match status.as_u16() {
        400 if body.contains("API key") => ConnectivityError::Auth(body.to_string()),
        401 | 403 => ConnectivityError::Auth(body.to_string()),
        _ => ConnectivityError::Unreachable(format!("HTTP {status}: {body}")),
    }
}

/// Parse the `retryDelay` a Gemini 429 body carries in its RetryInfo
/// detail, e.g. `"retryDelay": "32s"`.
fn parse_retry_delay(body: &str) -> Option<Duration> {
    let idx = body.find("\"retryDelay\"")?;
    let after = &body[idx..];
    let colon = after.find(':')?;
    let value = after[colon + 1..].trim_start().strip_prefix('"')?;
    let num: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    num.parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_key_400_is_auth() {
        let err = map_generation_status(
            reqwest::StatusCode::BAD_REQUEST,
            "API key not valid. Please pass a valid API key.",
        );
        assert!(matches!(err, ProviderError::Auth(_)));
    }

    #[test]
    fn other_400_is_invalid_response() {
        let err = map_generation_status(reqwest::StatusCode::BAD_REQUEST, "bad schema");
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn rate_limit_parses_retry_delay() {
        let body = r#"{"error": {"details": [{"retryDelay": "32s"}]}}"#;
        let err = map_generation_status(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        match err {
            ProviderError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(32)));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn rate_limit_without_delay() {
        let err = map_generation_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "quota");
        assert!(matches!(
            err,
            ProviderError::RateLimited { retry_after: None }
        ));
    }

    #[test]
    fn listing_403_is_auth() {
        let err = map_listing_status(reqwest::StatusCode::FORBIDDEN, "forbidden");
        assert!(matches!(err, ConnectivityError::Auth(_)));
    }
}
