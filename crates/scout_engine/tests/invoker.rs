use std::time::Duration;

use scout_engine::{GeminiInvoker, Grounding, InvocationFailure, InvokerSettings, ModelInvoker};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn settings_for(server: &MockServer) -> InvokerSettings {
    InvokerSettings {
        api_base: server.uri(),
        api_key: Some("test-key".to_string()),
        ..InvokerSettings::default()
    }
}

fn text_response(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|text| json!({ "text": text })).collect();
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn grounded_call_sends_key_prompt_and_search_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "analizza https://example.com" }] }],
            "tools": [{ "google_search": {} }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response(&["```json\n[", "]\n```"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let invoker = GeminiInvoker::new(settings_for(&server));
    let text = invoker
        .invoke("analizza https://example.com", Grounding::Enabled)
        .await
        .expect("invoke ok");
    assert_eq!(text, "```json\n[]\n```");
}

#[tokio::test]
async fn ungrounded_call_omits_tools() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["[]"])))
        .mount(&server)
        .await;

    let invoker = GeminiInvoker::new(settings_for(&server));
    invoker.invoke("p", Grounding::Disabled).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("tools").is_none());
}

#[tokio::test]
async fn empty_text_is_an_invocation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let invoker = GeminiInvoker::new(settings_for(&server));
    let err = invoker.invoke("p", Grounding::Enabled).await.unwrap_err();
    assert_eq!(err.kind, InvocationFailure::EmptyResponse);
}

#[tokio::test]
async fn http_error_carries_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let invoker = GeminiInvoker::new(settings_for(&server));
    let err = invoker.invoke("p", Grounding::Enabled).await.unwrap_err();
    assert_eq!(err.kind, InvocationFailure::HttpStatus(403));
    assert_eq!(err.message, "API key not valid");
}

#[tokio::test]
async fn non_json_envelope_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let invoker = GeminiInvoker::new(settings_for(&server));
    let err = invoker.invoke("p", Grounding::Enabled).await.unwrap_err();
    assert_eq!(err.kind, InvocationFailure::MalformedEnvelope);
}

#[tokio::test]
async fn slow_model_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(text_response(&["[]"])),
        )
        .mount(&server)
        .await;

    let settings = InvokerSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let invoker = GeminiInvoker::new(settings);
    let err = invoker.invoke("p", Grounding::Enabled).await.unwrap_err();
    assert_eq!(err.kind, InvocationFailure::Timeout);
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = MockServer::start().await;
    let settings = InvokerSettings {
        api_key: Some("   ".to_string()),
        ..settings_for(&server)
    };
    let invoker = GeminiInvoker::new(settings);
    let err = invoker.invoke("p", Grounding::Enabled).await.unwrap_err();
    assert_eq!(err.kind, InvocationFailure::MissingApiKey);
    assert!(server.received_requests().await.unwrap().is_empty());
}
