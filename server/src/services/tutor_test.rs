use super::*;
use crate::llm::types::{LlmError, Role as LlmRole};
use crate::state::test_helpers::MockLlm;

fn transcript() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("Can you help with my essay?"),
        ChatMessage::model("Of course. What is it about?"),
        ChatMessage::user("Climate change."),
    ]
}

// =========================================================================
// Persona
// =========================================================================

#[test]
fn personas_differ_in_instruction_and_temperature() {
    assert_ne!(
        Persona::Helper.system_instruction(Subject::English),
        Persona::Socratic.system_instruction(Subject::English)
    );
    assert!((Persona::Helper.temperature() - 0.7).abs() < f32::EPSILON);
    assert!((Persona::Socratic.temperature() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn helper_never_rewrites_student_text() {
    assert!(Persona::Helper.system_instruction(Subject::English).contains("NEVER rewrite"));
    assert!(Persona::Helper.system_instruction(Subject::Swedish).contains("ALDRIG skriv om"));
}

#[test]
fn socratic_describes_three_steps_in_both_languages() {
    let en = Persona::Socratic.system_instruction(Subject::English);
    assert!(en.contains("Step 1") && en.contains("Step 2") && en.contains("Step 3"));
    let sv = Persona::Socratic.system_instruction(Subject::Swedish);
    assert!(sv.contains("Steg 1") && sv.contains("Steg 2") && sv.contains("Steg 3"));
}

// =========================================================================
// split_transcript
// =========================================================================

#[test]
fn split_transcript_separates_latest() {
    let (history, latest) = split_transcript(&transcript()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, LlmRole::User);
    assert_eq!(history[1].role, LlmRole::Model);
    assert_eq!(latest, Message::user("Climate change."));
}

#[test]
fn split_transcript_single_message_has_empty_history() {
    let (history, latest) = split_transcript(&[ChatMessage::user("hi")]).unwrap();
    assert!(history.is_empty());
    assert_eq!(latest.text, "hi");
}

#[test]
fn split_transcript_empty_is_error() {
    assert!(matches!(split_transcript(&[]), Err(ProxyError::EmptyConversation)));
}

#[test]
fn split_transcript_keeps_consecutive_user_messages() {
    let msgs = vec![ChatMessage::user("one"), ChatMessage::user("two")];
    let (history, latest) = split_transcript(&msgs).unwrap();
    assert_eq!(history, vec![Message::user("one")]);
    assert_eq!(latest, Message::user("two"));
}

// =========================================================================
// get_chat_response
// =========================================================================

#[tokio::test]
async fn get_chat_response_replays_full_history() {
    let llm = MockLlm::replying("What is your main argument?");
    let req = ChatRequest { messages: transcript(), subject: Subject::English };
    let reply = get_chat_response(&llm, Persona::Helper, &req).await.unwrap();
    assert_eq!(reply.text, "What is your main argument?");

    let calls = llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].messages.len(), 3);
    assert_eq!(calls[0].messages[2], Message::user("Climate change."));
    assert_eq!(calls[0].system.as_deref(), Some(Persona::Helper.system_instruction(Subject::English)));
    assert!(calls[0].response_schema.is_none());
}

#[tokio::test]
async fn get_chat_response_uses_subject_language_instruction() {
    let llm = MockLlm::replying("Vad vet du redan?");
    let req = ChatRequest { messages: vec![ChatMessage::user("Hej")], subject: Subject::Swedish };
    get_chat_response(&llm, Persona::Socratic, &req).await.unwrap();

    let call = &llm.calls()[0];
    assert_eq!(call.system.as_deref(), Some(Persona::Socratic.system_instruction(Subject::Swedish)));
    assert!((call.temperature - 0.5).abs() < f32::EPSILON);
}

#[tokio::test]
async fn get_chat_response_returns_text_verbatim() {
    let raw = "  **Bold** reply with trailing space  ";
    let llm = MockLlm::replying(raw);
    let req = ChatRequest { messages: vec![ChatMessage::user("x")], subject: Subject::English };
    let reply = get_chat_response(&llm, Persona::Helper, &req).await.unwrap();
    assert_eq!(reply.text, raw);
}

#[tokio::test]
async fn get_chat_response_empty_transcript_skips_model() {
    let llm = MockLlm::replying("unused");
    let req = ChatRequest { messages: vec![], subject: Subject::English };
    let err = get_chat_response(&llm, Persona::Helper, &req).await.unwrap_err();
    assert!(matches!(err, ProxyError::EmptyConversation));
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn get_chat_response_propagates_llm_error() {
    let llm = MockLlm::failing(LlmError::ApiRequest("timeout".into()));
    let req = ChatRequest { messages: transcript(), subject: Subject::English };
    let err = get_chat_response(&llm, Persona::Helper, &req).await.unwrap_err();
    assert_eq!(err.to_string(), "API request failed: timeout");
}
