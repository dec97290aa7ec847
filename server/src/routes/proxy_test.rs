use super::*;
use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, header};
use serde_json::json;
use tower::ServiceExt;

use crate::llm::types::LlmError;
use crate::state::test_helpers::{self, MockLlm};

async fn send(state: AppState, method: Method, body: Option<Value>) -> (StatusCode, Value) {
    let app = crate::routes::app(state);
    let mut builder = Request::builder().method(method).uri(proto::PROXY_PATH);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn state_with(llm: &Arc<MockLlm>) -> AppState {
    test_helpers::test_app_state_with_llm(llm.clone())
}

// =========================================================================
// method + envelope checks
// =========================================================================

#[tokio::test]
async fn get_is_method_not_allowed() {
    let llm = Arc::new(MockLlm::replying("unused"));
    let (status, body) = send(state_with(&llm), Method::GET, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "error": "Method not allowed" }));
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn put_and_delete_are_method_not_allowed() {
    let llm = Arc::new(MockLlm::replying("unused"));
    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let (status, _) = send(state_with(&llm), method, Some(json!({ "type": "get-chat-response" }))).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn unknown_type_is_bad_request_without_model_call() {
    let llm = Arc::new(MockLlm::replying("unused"));
    let (status, body) =
        send(state_with(&llm), Method::POST, Some(json!({ "type": "get-grades", "payload": {} }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request type" }));
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn missing_type_is_bad_request() {
    let llm = Arc::new(MockLlm::replying("unused"));
    let (status, body) = send(state_with(&llm), Method::POST, Some(json!({ "payload": {} }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let app = crate::routes::app(test_helpers::test_app_state());
    let request = Request::builder()
        .method(Method::POST)
        .uri(proto::PROXY_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_payload_is_bad_request() {
    let llm = Arc::new(MockLlm::replying("unused"));
    let (status, body) = send(
        state_with(&llm),
        Method::POST,
        Some(json!({ "type": "get-feedback", "payload": { "instructions": "x", "subject": "English" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request payload"));
    assert!(llm.calls().is_empty());
}

// =========================================================================
// success paths
// =========================================================================

#[tokio::test]
async fn feedback_round_trip() {
    let llm = Arc::new(MockLlm::replying(
        r#"{"instructionFollowing":"All five sentences are there.","languageFeedback":"Watch irregular verbs."}"#,
    ));
    let (status, body) = send(
        state_with(&llm),
        Method::POST,
        Some(json!({
            "type": "get-feedback",
            "payload": { "instructions": "Five sentences", "studentText": "I goed home.", "subject": "Svenska" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instructionFollowing"], "All five sentences are there.");
    assert_eq!(body["languageFeedback"], "Watch irregular verbs.");
    assert!(llm.calls()[0].messages[0].text.contains("MUST be in Swedish."));
}

#[tokio::test]
async fn chat_round_trip() {
    let llm = Arc::new(MockLlm::replying("What do you think the author means?"));
    let (status, body) = send(
        state_with(&llm),
        Method::POST,
        Some(json!({
            "type": "get-chat-response",
            "payload": {
                "messages": [
                    { "role": "user", "text": "Help me with this poem." },
                    { "role": "model", "text": "Which line?" },
                    { "role": "user", "text": "The last one." }
                ],
                "subject": "English"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "What do you think the author means?" }));
    assert_eq!(llm.calls()[0].messages.len(), 3);
}

// =========================================================================
// handler failures
// =========================================================================

#[tokio::test]
async fn llm_failure_is_internal_error_with_message() {
    let llm = Arc::new(MockLlm::failing(LlmError::ApiResponse { status: 429, body: "quota".into() }));
    let (status, body) = send(
        state_with(&llm),
        Method::POST,
        Some(json!({
            "type": "get-test-chat-response",
            "payload": { "messages": [{ "role": "user", "text": "hi" }], "subject": "English" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "API response error: status 429" }));
}

#[tokio::test]
async fn malformed_model_output_is_internal_error() {
    let llm = Arc::new(MockLlm::replying("Sure! Here is your feedback."));
    let (status, body) = send(
        state_with(&llm),
        Method::POST,
        Some(json!({
            "type": "get-feedback",
            "payload": { "instructions": "i", "studentText": "t", "subject": "English" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("malformed"));
}

#[tokio::test]
async fn empty_conversation_is_internal_error() {
    let llm = Arc::new(MockLlm::replying("unused"));
    let (status, body) = send(
        state_with(&llm),
        Method::POST,
        Some(json!({ "type": "get-chat-response", "payload": { "messages": [], "subject": "English" } })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "conversation has no messages");
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn unconfigured_llm_is_internal_error() {
    let (status, body) = send(
        test_helpers::test_app_state(),
        Method::POST,
        Some(json!({
            "type": "get-chat-response",
            "payload": { "messages": [{ "role": "user", "text": "hi" }], "subject": "English" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "LLM not configured");
}

// =========================================================================
// health
// =========================================================================

#[tokio::test]
async fn healthz_ok() {
    let app = crate::routes::app(test_helpers::test_app_state());
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
