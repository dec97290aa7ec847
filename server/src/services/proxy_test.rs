use super::*;
use crate::state::test_helpers::MockLlm;
use proto::{ChatMessage, ChatRequest, FeedbackRequest, Subject};

fn chat(messages: Vec<ChatMessage>) -> ChatRequest {
    ChatRequest { messages, subject: Subject::English }
}

// =========================================================================
// ProxyError
// =========================================================================

#[test]
fn status_mapping() {
    assert_eq!(ProxyError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(ProxyError::InvalidRequest.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ProxyError::UnknownOperation("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(ProxyError::InvalidPayload("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(ProxyError::EmptyConversation.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ProxyError::LlmNotConfigured.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        ProxyError::Llm(LlmError::ApiParse("x".into())).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(ProxyError::Serialize("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn unknown_operation_message_hides_tag() {
    assert_eq!(ProxyError::UnknownOperation("drop-tables".into()).message(), "Invalid request type");
}

#[test]
fn rejected_tag_only_for_unknown_operation() {
    assert_eq!(ProxyError::UnknownOperation("get-grades".into()).rejected_tag(), Some("get-grades"));
    assert_eq!(ProxyError::InvalidRequest.rejected_tag(), None);
    assert_eq!(ProxyError::InvalidPayload("get-feedback".into()).rejected_tag(), None);
}

#[test]
fn unserializable_value_is_error_not_null() {
    let mut bad = std::collections::HashMap::new();
    bad.insert((1, 2), 3);
    let err = to_json(bad).unwrap_err();
    assert!(matches!(err, ProxyError::Serialize(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn serializable_value_converts() {
    let value = to_json(proto::ChatReply { text: "hej".into() }).unwrap();
    assert_eq!(value, serde_json::json!({ "text": "hej" }));
}

#[test]
fn llm_error_message_is_its_display() {
    let err = ProxyError::Llm(LlmError::ApiResponse { status: 500, body: "x".into() });
    assert_eq!(err.message(), "API response error: status 500");
}

#[test]
fn blank_message_uses_fallback() {
    assert_eq!(message_or_fallback("   ".into()), INTERNAL_ERROR_FALLBACK);
    assert_eq!(message_or_fallback(String::new()), INTERNAL_ERROR_FALLBACK);
    assert_eq!(message_or_fallback("quota exceeded".into()), "quota exceeded");
}

#[test]
fn protocol_errors_convert() {
    let err: ProxyError = proto::Operation::from_tag("nope").unwrap_err().into();
    assert!(matches!(err, ProxyError::UnknownOperation(ref tag) if tag == "nope"));
}

// =========================================================================
// dispatch
// =========================================================================

#[tokio::test]
async fn dispatch_without_llm_fails() {
    let req = ProxyRequest::GetChatResponse(chat(vec![ChatMessage::user("hi")]));
    let err = dispatch(None, req).await.unwrap_err();
    assert!(matches!(err, ProxyError::LlmNotConfigured));
}

#[tokio::test]
async fn dispatch_feedback_returns_camel_case_json() {
    let llm = MockLlm::replying(r#"{"instructionFollowing":"ok","languageFeedback":"fine"}"#);
    let req = ProxyRequest::GetFeedback(FeedbackRequest {
        instructions: "i".into(),
        student_text: "t".into(),
        subject: Subject::English,
    });
    let value = dispatch(Some(&llm), req).await.unwrap();
    assert_eq!(value, serde_json::json!({ "instructionFollowing": "ok", "languageFeedback": "fine" }));
}

#[tokio::test]
async fn dispatch_chat_uses_helper_persona() {
    let llm = MockLlm::replying("reply");
    let req = ProxyRequest::GetChatResponse(chat(vec![ChatMessage::user("hi")]));
    let value = dispatch(Some(&llm), req).await.unwrap();
    assert_eq!(value, serde_json::json!({ "text": "reply" }));
    assert_eq!(llm.calls()[0].system.as_deref(), Some(Persona::Helper.system_instruction(Subject::English)));
}

#[tokio::test]
async fn dispatch_test_chat_uses_socratic_persona() {
    let llm = MockLlm::replying("step one");
    let req = ProxyRequest::GetTestChatResponse(chat(vec![ChatMessage::user("hi")]));
    let value = dispatch(Some(&llm), req).await.unwrap();
    assert_eq!(value["text"], "step one");
    assert_eq!(llm.calls()[0].system.as_deref(), Some(Persona::Socratic.system_instruction(Subject::English)));
}
