use super::*;
use serde_json::json;

#[test]
fn subject_uses_svenska_on_the_wire() {
    assert_eq!(serde_json::to_value(Subject::Swedish).unwrap(), json!("Svenska"));
    assert_eq!(serde_json::to_value(Subject::English).unwrap(), json!("English"));
    let parsed: Subject = serde_json::from_value(json!("Svenska")).unwrap();
    assert_eq!(parsed, Subject::Swedish);
}

#[test]
fn subject_rejects_unknown_label() {
    assert!(serde_json::from_value::<Subject>(json!("Deutsch")).is_err());
}

#[test]
fn subject_parse_accepts_labels_and_codes() {
    assert_eq!(Subject::parse("svenska"), Some(Subject::Swedish));
    assert_eq!(Subject::parse(" Swedish "), Some(Subject::Swedish));
    assert_eq!(Subject::parse("EN"), Some(Subject::English));
    assert_eq!(Subject::parse("klingon"), None);
}

#[test]
fn operation_tags_match_wire_names() {
    for op in [Operation::GetFeedback, Operation::GetChatResponse, Operation::GetTestChatResponse] {
        assert_eq!(Operation::from_tag(op.as_str()).unwrap(), op);
    }
    assert!(matches!(
        Operation::from_tag("get-everything"),
        Err(ProtocolError::UnknownOperation(tag)) if tag == "get-everything"
    ));
}

#[test]
fn feedback_request_serializes_camel_case_envelope() {
    let req = ProxyRequest::GetFeedback(FeedbackRequest {
        instructions: "Write about summer".into(),
        student_text: "Summer is warm.".into(),
        subject: Subject::English,
    });
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "get-feedback",
            "payload": {
                "instructions": "Write about summer",
                "studentText": "Summer is warm.",
                "subject": "English"
            }
        })
    );
}

#[test]
fn chat_request_serializes_roles_lowercase() {
    let req = ProxyRequest::GetTestChatResponse(ChatRequest {
        messages: vec![ChatMessage::user("hej"), ChatMessage::model("hej hej")],
        subject: Subject::Swedish,
    });
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["type"], "get-test-chat-response");
    assert_eq!(value["payload"]["messages"][0]["role"], "user");
    assert_eq!(value["payload"]["messages"][1]["role"], "model");
    assert_eq!(value["payload"]["subject"], "Svenska");
}

#[test]
fn raw_envelope_unknown_tag_is_rejected_before_payload() {
    let raw: RawEnvelope = serde_json::from_value(json!({ "type": "delete-all", "payload": 42 })).unwrap();
    assert!(matches!(raw.into_request(), Err(ProtocolError::UnknownOperation(_))));
}

#[test]
fn raw_envelope_types_known_payload() {
    let raw: RawEnvelope = serde_json::from_value(json!({
        "type": "get-chat-response",
        "payload": { "messages": [{ "role": "user", "text": "hi" }], "subject": "English" }
    }))
    .unwrap();
    let req = raw.into_request().unwrap();
    assert_eq!(req.operation(), Operation::GetChatResponse);
    let ProxyRequest::GetChatResponse(chat) = req else {
        panic!("expected chat request");
    };
    assert_eq!(chat.messages, vec![ChatMessage::user("hi")]);
}

#[test]
fn raw_envelope_missing_payload_field_is_invalid_payload() {
    let raw: RawEnvelope = serde_json::from_value(json!({
        "type": "get-feedback",
        "payload": { "instructions": "x", "subject": "English" }
    }))
    .unwrap();
    let err = raw.into_request().unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidPayload { operation: "get-feedback", .. }));
    assert!(err.to_string().contains("studentText"));
}

#[test]
fn feedback_missing_field_fails_to_parse() {
    let result = serde_json::from_value::<Feedback>(json!({ "instructionFollowing": "ok" }));
    assert!(result.is_err());
}

#[test]
fn feedback_parses_both_fields() {
    let fb: Feedback = serde_json::from_value(json!({
        "instructionFollowing": "All points covered.",
        "languageFeedback": "Vary your sentence openings."
    }))
    .unwrap();
    assert_eq!(fb.instruction_following, "All points covered.");
    assert_eq!(fb.language_feedback, "Vary your sentence openings.");
}
