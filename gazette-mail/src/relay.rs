//! Transactional email relay client.

use gazette_types::DispatchError;
use serde::Deserialize;

/// Default relay API base URL.
const DEFAULT_BASE_URL: &str = "https://api.resend.com";

/// Sender used when the configured address is malformed.
pub const DEFAULT_SENDER: &str = "Daily Briefing <briefing@news.gazette.dev>";

/// Split a comma-separated recipient list, dropping blanks and duplicates.
///
/// The scheduled path configures recipients as one string; the interactive
/// path sends per-field inputs and joins them before calling this.
#[must_use]
pub fn parse_recipients(raw: &str) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let address = part.trim();
        if !address.is_empty() && !recipients.iter().any(|r| r == address) {
            recipients.push(address.to_string());
        }
    }
    recipients
}

/// Relay acknowledgment for an accepted send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchReceipt {
    /// Relay-assigned message id.
    pub id: String,
}

/// Client for a Resend-style email relay.
///
/// # Example
///
/// ```no_run
/// use gazette_mail::RelayClient;
///
/// let relay = RelayClient::new("re_...")
///     .sender("Newsroom <newsroom@example.org>");
/// ```
pub struct RelayClient {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) from: String,
    pub(crate) client: reqwest::Client,
}

impl RelayClient {
    /// Create a client with the default relay endpoint and sender.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            from: DEFAULT_SENDER.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the relay base URL (testing, self-hosted relays).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the sender in `Display Name <email>` form.
    ///
    /// A value without an `@` cannot be an address; it is silently reset
    /// to [`DEFAULT_SENDER`] rather than poisoning every later send.
    #[must_use]
    pub fn sender(mut self, from: impl Into<String>) -> Self {
        let from = from.into();
        self.from = if from.contains('@') {
            from
        } else {
            DEFAULT_SENDER.into()
        };
        self
    }

    pub(crate) fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }

    /// Send the rendered digest to the recipients.
    ///
    /// Recipients are used as given; deduplication is the caller's input
    /// handling, not this client's.
    pub async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html: &str,
    ) -> Result<DispatchReceipt, DispatchError> {
        let url = self.emails_url();
        tracing::debug!(url = %url, recipients = recipients.len(), "dispatching briefing email");

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "from": self.from,
                "to": recipients,
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DispatchError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            // The relay's own error text, unmodified, is the most useful
            // thing an operator can see here.
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| DispatchError::Unreachable(format!("invalid relay response: {e}")))
    }
}
