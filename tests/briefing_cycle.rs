//! End-to-end briefing scenarios without live API keys.
//!
//! Exercises the whole chain — configuration, generation over a stub
//! provider, session state, rendering — the way the dashboard backend
//! composes it.

use gazette_pipeline::{BriefingSession, GeneratorConfig, PromptConfig};
use gazette_types::{
    BriefingRequest, ConnectivityError, DispatchError, GenerationCall, GenerationResult,
    ModelDescriptor, Provider, ProviderError, check_connectivity,
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Stub provider with a fixed editorial answer and a canned model list.
struct StubProvider {
    answer: String,
    models: Vec<ModelDescriptor>,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    fn new(answer: String, models: Vec<ModelDescriptor>) -> Self {
        Self {
            answer,
            models,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the generation-call counter, usable after the provider
    /// moves into a session.
    fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Provider for StubProvider {
    fn generate(
        &self,
        call: GenerationCall,
    ) -> impl Future<Output = Result<GenerationResult, ProviderError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = Ok(GenerationResult {
            text: self.answer.clone(),
            model: call.model,
        });
        async move { result }
    }

    fn list_models(
        &self,
    ) -> impl Future<Output = Result<Vec<ModelDescriptor>, ConnectivityError>> + Send {
        let result = if self.models.is_empty() {
            Err(ConnectivityError::NoModels)
        } else {
            Ok(self.models.clone())
        };
        async move { result }
    }
}

fn news_item(n: usize, local_prefix: &str) -> serde_json::Value {
    json!({
        "titleLocal": format!("{local_prefix} {n}"),
        "titleEn": format!("headline {n}"),
        "summaryLocal": format!("ringkasan {n}"),
        "summaryEn": format!("summary {n}"),
        "sourceUrl": format!("https://news.example.org/{n}"),
        "sourceName": "Example News",
    })
}

fn full_answer(date: &str) -> String {
    json!({
        "viralTitles": ["v1", "v2", "v3"],
        "medicalViralTitles": ["mv1", "mv2", "mv3"],
        "generalNews": (1..=6).map(|n| news_item(n, "berita umum")).collect::<Vec<_>>(),
        "medicalNews": (1..=6).map(|n| news_item(n, "berita medis")).collect::<Vec<_>>(),
        "date": date,
    })
    .to_string()
}

fn config() -> GeneratorConfig {
    GeneratorConfig {
        primary_model: "stub-model".into(),
        fallback_models: vec!["stub-fallback".into()],
        backoff_unit: Duration::from_millis(1),
        prompt: PromptConfig::default(),
        ..GeneratorConfig::default()
    }
}

#[tokio::test]
async fn full_cycle_generates_and_renders() {
    let provider = StubProvider::new(
        full_answer("2025-01-10"),
        vec![ModelDescriptor::new("stub-model")],
    );
    assert!(check_connectivity(&provider).await);

    let session = BriefingSession::new(provider, config());
    let payload = session
        .generate(&BriefingRequest::for_date("2025-01-10"))
        .await
        .unwrap();

    assert_eq!(payload.date, "2025-01-10");
    assert_eq!(payload.general_news.len(), 6);
    assert_eq!(payload.medical_news.len(), 6);
    assert_eq!(payload.viral_titles.len(), 3);
    assert_eq!(payload.medical_viral_titles.len(), 3);

    let html = gazette_mail::render(&payload);
    for item in payload.general_news.iter().chain(&payload.medical_news) {
        assert!(html.contains(&item.title_local), "missing {}", item.title_local);
    }
}

#[tokio::test]
async fn fenced_and_chatty_output_still_yields_a_briefing() {
    let wrapped = format!(
        "Here is the briefing you asked for:\n```json\n{}\n```\nLet me know!",
        full_answer("2025-01-10")
    );
    let provider = StubProvider::new(wrapped, vec![ModelDescriptor::new("stub-model")]);
    let session = BriefingSession::new(provider, config());

    let payload = session
        .generate(&BriefingRequest::for_date("2025-01-10"))
        .await
        .unwrap();
    assert!(payload.has_news());
}

#[tokio::test]
async fn connectivity_check_fails_on_empty_model_list() {
    let provider = StubProvider::new(full_answer("2025-01-10"), vec![]);
    assert!(!check_connectivity(&provider).await);
}

#[tokio::test]
async fn dispatch_failure_does_not_require_regeneration() {
    let provider = StubProvider::new(
        full_answer("2025-01-10"),
        vec![ModelDescriptor::new("stub-model")],
    );
    let calls = provider.counter();
    let session = BriefingSession::new(provider, config());

    let payload = session
        .generate(&BriefingRequest::for_date("2025-01-10"))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A relay that rejects the first send and accepts the second.
    let relay_server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/emails"))
        .respond_with(wiremock::ResponseTemplate::new(500).set_body_string("relay down"))
        .up_to_n_times(1)
        .mount(&relay_server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/emails"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "msg_retry"})),
        )
        .mount(&relay_server)
        .await;

    let relay = gazette_mail::RelayClient::new("re_test").base_url(relay_server.uri());
    let to = vec!["reader@example.org".to_string()];
    let subject = gazette_mail::subject_for(&payload.date);
    let html = gazette_mail::render(&payload);

    let first = relay.send(&to, &subject, &html).await;
    assert!(matches!(first, Err(DispatchError::Rejected { status: 500, .. })));

    // The retried send reuses the stored payload with no regeneration.
    let retried = session.last_payload().expect("payload kept after failed send");
    let html = gazette_mail::render(&retried);
    assert!(html.contains("berita umum 1"));
    let receipt = relay.send(&to, &subject, &html).await.unwrap();
    assert_eq!(receipt.id, "msg_retry");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn prelude_covers_the_dashboard_surface() {
    use gazette::prelude::*;

    let provider = StubProvider::new(
        full_answer("2025-01-10"),
        vec![ModelDescriptor::new("stub-model")],
    );
    let session = BriefingSession::new(provider, config());
    let payload = session
        .generate(&BriefingRequest::for_date("2025-01-10"))
        .await
        .unwrap();

    let html = render(&payload);
    assert!(html.contains("Daily Briefing"));
    assert_eq!(
        normalize_base_url("gateway.example.org"),
        "https://gateway.example.org/v1"
    );
    assert_eq!(parse_recipients("a@example.org,a@example.org").len(), 1);
}

#[tokio::test]
async fn resolved_config_feeds_the_cycle() {
    let resolved = gazette_config::resolve_with(None, Some("stub-model"), |name| {
        (name == gazette_config::ENV_API_KEY).then(|| "test-key".to_string())
    })
    .unwrap();
    assert_eq!(resolved.base_url, gazette_config::DEFAULT_BASE_URL);

    let provider = StubProvider::new(
        full_answer("2025-02-01"),
        vec![ModelDescriptor::new(resolved.model_id.clone())],
    );
    let mut generator_config = config();
    generator_config.primary_model = resolved.model_id;

    let session = BriefingSession::new(provider, generator_config);
    let payload = session
        .generate(&BriefingRequest::for_date("2025-02-01"))
        .await
        .unwrap();
    assert_eq!(payload.date, "2025-02-01");
}
