//! Integration tests for the OpenAI-compatible client using wiremock.

use gazette_provider_openai::OpenAiCompatible;
use gazette_types::{ConnectivityError, GenerationCall, Provider, ProviderError};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn minimal_call() -> GenerationCall {
    GenerationCall {
        model: "gpt-5-mini".into(),
        system: "You are a news editor.".into(),
        user: "Compile the briefing for 2025-01-10.".into(),
        response_schema: Some(serde_json::json!({"type": "object"})),
        enable_search: false,
    }
}

fn success_response_body() -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-abc123",
        "object": "chat.completion",
        "model": "gpt-5-mini-2025-08-07",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "{\"generalNews\":[],\"date\":\"2025-01-10\"}"
            },
            "finish_reason": "stop"
        }]
    })
}

fn client_for(server: &MockServer) -> OpenAiCompatible {
    OpenAiCompatible::new("test-api-key", format!("{}/v1", server.uri()))
}

#[tokio::test]
async fn generate_sends_correct_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_response_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).generate(minimal_call()).await;
    assert!(result.is_ok(), "expected Ok, got: {:?}", result.err());
}

#[tokio::test]
async fn generate_parses_text_and_served_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "gpt-5-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_response_body()))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).generate(minimal_call()).await.unwrap();
    assert_eq!(result.text, "{\"generalNews\":[],\"date\":\"2025-01-10\"}");
    assert_eq!(result.model, "gpt-5-mini-2025-08-07");
}

#[tokio::test]
async fn generate_maps_429_with_retry_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {
                "type": "rate_limit_error",
                "message": "Rate limit exceeded. Please retry after 60 seconds."
            }
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).generate(minimal_call()).await.unwrap_err();
    match err {
        ProviderError::RateLimited { retry_after } => {
            assert_eq!(retry_after, Some(Duration::from_secs(60)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_maps_401_to_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "type": "authentication_error", "message": "Invalid API key" }
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).generate(minimal_call()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Auth(_)), "got {err:?}");
}

#[tokio::test]
async fn generate_surfaces_refusal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": null, "refusal": "cannot comply" },
                "finish_reason": "stop"
            }]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).generate(minimal_call()).await.unwrap_err();
    assert!(matches!(err, ProviderError::SafetyRefusal(_)), "got {err:?}");
}

#[tokio::test]
async fn generate_surfaces_empty_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "" } }]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).generate(minimal_call()).await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyBody), "got {err:?}");
}

#[tokio::test]
async fn list_models_probes_and_sorts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "gpt-5-mini"}, {"id": "gpt-5"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let models = client_for(&mock_server).list_models().await.unwrap();
    assert_eq!(models[0].id, "gpt-5");
    assert_eq!(models[1].id, "gpt-5-mini");
}

#[tokio::test]
async fn list_models_html_page_is_wrong_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string("<!DOCTYPE html><html><body>Dashboard</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).list_models().await.unwrap_err();
    assert!(matches!(err, ConnectivityError::WrongEndpoint), "got {err:?}");
}

#[tokio::test]
async fn list_models_routes_through_relay_on_network_failure() {
    let relay_server = MockServer::start().await;

    // The relay receives the original target URL and authorization and
    // answers with the gateway's listing body.
    Mock::given(method("POST"))
        .and(path("/api/proxy"))
        .and(body_partial_json(serde_json::json!({
            "url": "http://127.0.0.1:1/v1/models",
            "method": "GET",
            "authorization": "Bearer test-api-key",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "gpt-5-mini"}]
        })))
        .expect(1)
        .mount(&relay_server)
        .await;

    // Port 1 refuses connections, forcing the network-failure arm.
    let client = OpenAiCompatible::new("test-api-key", "http://127.0.0.1:1/v1")
        .with_relay(format!("{}/api/proxy", relay_server.uri()));

    let models = client.list_models().await.unwrap();
    assert_eq!(models[0].id, "gpt-5-mini");
}

#[tokio::test]
async fn list_models_without_relay_reports_unreachable() {
    let client = OpenAiCompatible::new("test-api-key", "http://127.0.0.1:1/v1");
    let err = client.list_models().await.unwrap_err();
    assert!(matches!(err, ConnectivityError::Unreachable(_)), "got {err:?}");
}
