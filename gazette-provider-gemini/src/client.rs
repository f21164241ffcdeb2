//! Gemini API client struct and builder.

use gazette_config::encode_header_value;
use gazette_types::{
    ConnectivityError, GenerationCall, GenerationResult, ModelDescriptor, Provider, ProviderError,
};
use std::future::Future;

use crate::error::{map_generation_status, map_listing_status};
use crate::mapping::{extract_text, to_generate_request};
use crate::models::{looks_like_html, parse_model_list};

/// Default Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini `generateContent` API.
///
/// # Example
///
/// ```no_run
/// use gazette_provider_gemini::Gemini;
///
/// let client = Gemini::new("AIza...").base_url("https://generativelanguage.googleapis.com/v1beta");
/// ```
pub struct Gemini {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) client: reqwest::Client,
}

impl Gemini {
    /// Create a client with the default Google endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (proxies, test servers).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub(crate) fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    pub(crate) fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    fn key_header(&self) -> String {
        encode_header_value(&self.api_key)
    }
}

impl Provider for Gemini {
    fn generate(
        &self,
        call: GenerationCall,
    ) -> impl Future<Output = Result<GenerationResult, ProviderError>> + Send {
        let url = self.generate_url(&call.model);
        let key = self.key_header();
        let http_client = self.client.clone();

        async move {
            let body = to_generate_request(&call);

            tracing::debug!(url = %url, model = %call.model, search = call.enable_search,
                "sending generateContent request");

            let response = http_client
                .post(&url)
                .header("x-goog-api-key", key)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(|e| ProviderError::Network(e.to_string()))?;

            let status = response.status();
            let response_text = response
                .text()
                .await
                .map_err(|e| ProviderError::Network(e.to_string()))?;

            if !status.is_success() {
                return Err(map_generation_status(status, &response_text));
            }

            let json: serde_json::Value = serde_json::from_str(&response_text)
                .map_err(|e| ProviderError::InvalidResponse(format!("invalid JSON response: {e}")))?;

            let text = extract_text(&json)?;
            Ok(GenerationResult {
                text,
                model: call.model,
            })
        }
    }

    fn list_models(
        &self,
    ) -> impl Future<Output = Result<Vec<ModelDescriptor>, ConnectivityError>> + Send {
        let url = self.models_url();
        let key = self.key_header();
        let http_client = self.client.clone();

        async move {
            tracing::debug!(url = %url, "probing model listing");

            let response = http_client
                .get(&url)
                .header("x-goog-api-key", key)
                .send()
                .await
                .map_err(|e| ConnectivityError::Unreachable(e.to_string()))?;

            let status = response.status();
            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response
                .text()
                .await
                .map_err(|e| ConnectivityError::Unreachable(e.to_string()))?;

            // An HTML page outranks any status: the base URL points at a
            // dashboard, and a URL correction is the useful advice.
            if looks_like_html(content_type.as_deref(), &body) {
                return Err(ConnectivityError::WrongEndpoint);
            }

            if !status.is_success() {
                return Err(map_listing_status(status, &body));
            }

            let json: serde_json::Value = serde_json::from_str(&body)
                .map_err(|e| ConnectivityError::Unreachable(format!("invalid listing JSON: {e}")))?;

            let models = parse_model_list(&json);
            if models.is_empty() {
                return Err(ConnectivityError::NoModels);
            }
            Ok(models)
        }
    }
}
