use super::*;

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    let err = LlmError::ApiRequest("conn refused".into());
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_429() {
    let err = LlmError::ApiResponse { status: 429, body: "rate limited".into() };
    assert!(err.retryable());
}

#[test]
fn retryable_api_response_503() {
    let err = LlmError::ApiResponse { status: 503, body: "unavailable".into() };
    assert!(err.retryable());
}

#[test]
fn not_retryable_api_response_400() {
    let err = LlmError::ApiResponse { status: 400, body: "bad request".into() };
    assert!(!err.retryable());
}

#[test]
fn not_retryable_parse_or_empty() {
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::EmptyResponse { reason: "SAFETY".into() }.retryable());
    assert!(!LlmError::MissingApiKey { var: "API_KEY".into() }.retryable());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_includes_status_and_reason() {
    let err = LlmError::ApiResponse { status: 500, body: "oops".into() };
    assert_eq!(err.to_string(), "API response error: status 500");
    let err = LlmError::EmptyResponse { reason: "MAX_TOKENS".into() };
    assert_eq!(err.to_string(), "model returned no text (reason: MAX_TOKENS)");
}

// =============================================================================
// Message constructors
// =============================================================================

#[test]
fn message_constructors_set_role() {
    assert_eq!(Message::user("hi").role, Role::User);
    assert_eq!(Message::model("hello").role, Role::Model);
    assert_eq!(Message::model("hello").text, "hello");
}
