//! Client struct and builder for OpenAI-compatible gateways.

use gazette_config::encode_header_value;
use gazette_types::{
    ConnectivityError, GenerationCall, GenerationResult, ModelDescriptor, Provider, ProviderError,
};
use std::future::Future;

use crate::error::{map_generation_error, map_generation_status, map_listing_status};
use crate::mapping::{extract_text, to_chat_request};
use crate::models::{looks_like_html, normalize_model_list};

/// Raw answer to a listing request, before interpretation.
struct ListingAnswer {
    status: reqwest::StatusCode,
    content_type: Option<String>,
    body: String,
}

/// Client for OpenAI-compatible Chat Completions gateways.
///
/// # Example
///
/// ```no_run
/// use gazette_provider_openai::OpenAiCompatible;
///
/// let client = OpenAiCompatible::new("sk-...", "https://api.openai.com/v1")
///     .with_relay("https://dashboard.example.org/api/proxy");
/// ```
pub struct OpenAiCompatible {
    /// Gateway API key. Percent-encoded at the header boundary.
    pub(crate) api_key: String,
    /// Normalized API base URL (see `gazette_config::normalize_base_url`).
    pub(crate) base_url: String,
    /// Optional same-origin relay used when the direct listing call fails
    /// at the network level (browser CORS restrictions on third-party
    /// gateways).
    pub(crate) relay_url: Option<String>,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl OpenAiCompatible {
    /// Create a client against a normalized base URL.
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            relay_url: None,
            client: reqwest::Client::new(),
        }
    }

    /// Configure a server-side relay for the listing probe.
    #[must_use]
    pub fn with_relay(mut self, url: impl Into<String>) -> Self {
        self.relay_url = Some(url.into());
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub(crate) fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", encode_header_value(&self.api_key))
    }

    async fn fetch_listing(&self, url: &str) -> Result<ListingAnswer, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header("authorization", self.bearer())
            .send()
            .await?;
        Self::read_answer(response).await
    }

    /// Retry the listing through the relay after a network-level failure.
    async fn fetch_listing_via_relay(
        &self,
        relay: &str,
        target: &str,
    ) -> Result<ListingAnswer, reqwest::Error> {
        let response = self
            .client
            .post(relay)
            .json(&serde_json::json!({
                "url": target,
                "method": "GET",
                "authorization": self.bearer(),
            }))
            .send()
            .await?;
        Self::read_answer(response).await
    }

    async fn read_answer(response: reqwest::Response) -> Result<ListingAnswer, reqwest::Error> {
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok(ListingAnswer {
            status,
            content_type,
            body,
        })
    }

    fn parse_listing(answer: &ListingAnswer) -> Result<Vec<ModelDescriptor>, ConnectivityError> {
        // An HTML page outranks any status: the base URL points at a
        // dashboard, and a URL correction is the useful advice.
        if looks_like_html(answer.content_type.as_deref(), &answer.body) {
            return Err(ConnectivityError::WrongEndpoint);
        }

        if !answer.status.is_success() {
            return Err(map_listing_status(answer.status, &answer.body));
        }

        let json: serde_json::Value = serde_json::from_str(&answer.body)
            .map_err(|e| ConnectivityError::Unreachable(format!("invalid listing JSON: {e}")))?;

        let models = normalize_model_list(&json);
        if models.is_empty() {
            return Err(ConnectivityError::NoModels);
        }
        Ok(models)
    }
}

impl Provider for OpenAiCompatible {
    fn generate(
        &self,
        call: GenerationCall,
    ) -> impl Future<Output = Result<GenerationResult, ProviderError>> + Send {
        let url = self.completions_url();
        let bearer = self.bearer();
        let http_client = self.client.clone();

        async move {
            let body = to_chat_request(&call);

            tracing::debug!(url = %url, model = %call.model, "sending generation request");

            let response = http_client
                .post(&url)
                .header("authorization", bearer)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(map_generation_error)?;

            let status = response.status();
            let response_text = response.text().await.map_err(map_generation_error)?;

            if !status.is_success() {
                return Err(map_generation_status(status, &response_text));
            }

            let json: serde_json::Value = serde_json::from_str(&response_text)
                .map_err(|e| ProviderError::InvalidResponse(format!("invalid JSON response: {e}")))?;

            let text = extract_text(&json)?;
            let model = json["model"]
                .as_str()
                .unwrap_or(call.model.as_str())
                .to_string();

            Ok(GenerationResult { text, model })
        }
    }

    fn list_models(
        &self,
    ) -> impl Future<Output = Result<Vec<ModelDescriptor>, ConnectivityError>> + Send {
        async move {
            let url = self.models_url();
            tracing::debug!(url = %url, "probing model listing");

            match self.fetch_listing(&url).await {
                Ok(answer) => Self::parse_listing(&answer),
                Err(direct_err) => {
                    // Network-level failure only; HTTP error statuses never
                    // reach this arm. Route around CORS via the relay.
                    let Some(relay) = self.relay_url.as_deref() else {
                        return Err(ConnectivityError::Unreachable(direct_err.to_string()));
                    };
                    tracing::debug!(relay = %relay, "direct listing failed, retrying via relay");
                    let answer = self
                        .fetch_listing_via_relay(relay, &url)
                        .await
                        .map_err(|e| ConnectivityError::Unreachable(e.to_string()))?;
                    Self::parse_listing(&answer)
                }
            }
        }
    }
}
