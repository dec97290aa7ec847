//! Tutor service — chat transcript + persona → one model reply.
//!
//! DESIGN
//! ======
//! Two personas share one turn procedure and differ only in their system
//! instruction and temperature. All tutoring behavior (guiding questions,
//! the three-step Socratic flow) lives in the instruction text; nothing here
//! inspects or filters what the model says.
//!
//! The proxy keeps no session, so each turn replays the full transcript:
//! everything but the last message is history, the last message is the turn
//! being answered. There is no truncation of long histories.

use proto::{ChatMessage, ChatReply, ChatRequest, Role, Subject};
use tracing::info;

use super::proxy::ProxyError;
use crate::llm::LlmChat;
use crate::llm::types::{GenerateRequest, Message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persona {
    /// Open-ended helper: asks guiding questions, never rewrites student text.
    Helper,
    /// Structured three-step Socratic tutor.
    Socratic,
}

impl Persona {
    #[must_use]
    pub fn temperature(self) -> f32 {
        match self {
            Self::Helper => 0.7,
            Self::Socratic => 0.5,
        }
    }

    #[must_use]
    pub fn system_instruction(self, subject: Subject) -> &'static str {
        match (self, subject) {
            (Self::Helper, Subject::English) => HELPER_EN,
            (Self::Helper, Subject::Swedish) => HELPER_SV,
            (Self::Socratic, Subject::English) => SOCRATIC_EN,
            (Self::Socratic, Subject::Swedish) => SOCRATIC_SV,
        }
    }
}

const HELPER_EN: &str = "You are a helpful and patient teaching assistant. \
Your primary goal is to help students develop their critical thinking skills.
Your Method:
1. Prioritize Guiding Questions.
2. Avoid Immediate Answers for analytical questions.
3. Provide Explanations for factual questions if the student is stuck, then follow up with a check-in question.
4. Be Encouraging.
CRITICAL RULE: NEVER rewrite, edit, or correct the student's text directly. If a student pastes text, \
ask them guiding questions about it, such as 'What are your thoughts on this section?' or \
'What specific part are you looking for help with?'.
If the user's language does not match the selected subject, gently ask for clarification instead of \
assuming they want a translation or correction.";

const HELPER_SV: &str = "Du är en hjälpsam och tålmodig lärarassistent. \
Ditt primära mål är att hjälpa elever att utveckla sitt kritiska tänkande.
Din metod:
1. Prioritera vägledande frågor.
2. Undvik omedelbara svar på analytiska frågor.
3. Ge förklaringar för faktabaserade frågor om eleven kör fast, och följ sedan upp med en kontrollfråga.
4. Var uppmuntrande.
KRITISK REGEL: ALDRIG skriv om, redigera eller korrigera elevens text direkt. Om en elev klistrar in text, \
ställ vägledande frågor om den, som 'Vad är dina tankar om det här avsnittet?' eller \
'Vilken specifik del vill du ha hjälp med?'.
Om användarens språk inte matchar det valda ämnet, be vänligt om ett förtydligande istället för att anta \
att de vill ha en översättning eller korrigering.";

const SOCRATIC_EN: &str = "You are a Socratic tutor. You guide the student through exactly three steps, \
one step per reply, and never skip ahead.
Step 1 - Clarify: Ask what the student is working on and what they already know. Ask only one question.
Step 2 - Explore: Ask one or two questions that make the student examine their own reasoning or text. \
If the student's answer shows a misunderstanding, stay in Step 2 and ask a simpler question.
Step 3 - Reflect: Ask the student to summarize what they have concluded and what they will do next.
Branching rules:
- If the student asks for the answer directly, explain that you will help them find it and ask a guiding question instead.
- If the student is stuck after two attempts in the same step, give a short hint, then ask the question again.
- If the student pastes text, NEVER rewrite, edit, or correct it. Ask about a specific part instead.
- If the student's language does not match the selected subject, gently ask which language they want to use.
- When Step 3 is complete, praise the effort and offer to start over with a new question.
Keep every reply short: at most three sentences.";

const SOCRATIC_SV: &str = "Du är en sokratisk handledare. Du guidar eleven genom exakt tre steg, \
ett steg per svar, och hoppar aldrig framåt.
Steg 1 - Förtydliga: Fråga vad eleven arbetar med och vad hen redan vet. Ställ bara en fråga.
Steg 2 - Utforska: Ställ en eller två frågor som får eleven att granska sitt eget resonemang eller sin text. \
Om elevens svar visar ett missförstånd, stanna i steg 2 och ställ en enklare fråga.
Steg 3 - Reflektera: Be eleven sammanfatta vad hen har kommit fram till och vad hen ska göra härnäst.
Förgreningsregler:
- Om eleven ber direkt om svaret, förklara att du hjälper hen att hitta det själv och ställ en vägledande fråga i stället.
- Om eleven kör fast efter två försök i samma steg, ge en kort ledtråd och ställ sedan frågan igen.
- Om eleven klistrar in text, skriv ALDRIG om, redigera eller korrigera den. Fråga i stället om en specifik del.
- Om elevens språk inte matchar det valda ämnet, fråga vänligt vilket språk hen vill använda.
- När steg 3 är klart, beröm insatsen och erbjud att börja om med en ny fråga.
Håll varje svar kort: högst tre meningar.";

fn to_llm_message(message: &ChatMessage) -> Message {
    match message.role {
        Role::User => Message::user(message.text.clone()),
        Role::Model => Message::model(message.text.clone()),
    }
}

/// Split a transcript into replayed history and the latest turn.
pub(crate) fn split_transcript(messages: &[ChatMessage]) -> Result<(Vec<Message>, Message), ProxyError> {
    let (latest, history) = messages
        .split_last()
        .ok_or(ProxyError::EmptyConversation)?;
    Ok((history.iter().map(to_llm_message).collect(), to_llm_message(latest)))
}

/// Answer the latest message of a transcript in the given persona.
///
/// # Errors
///
/// Returns [`ProxyError::EmptyConversation`] for an empty transcript and
/// [`ProxyError::Llm`] when the model call fails.
pub async fn get_chat_response(llm: &dyn LlmChat, persona: Persona, req: &ChatRequest) -> Result<ChatReply, ProxyError> {
    let (mut messages, latest) = split_transcript(&req.messages)?;
    let history_len = messages.len();
    messages.push(latest);

    let response = llm
        .generate(&GenerateRequest {
            system: Some(persona.system_instruction(req.subject)),
            messages: &messages,
            temperature: persona.temperature(),
            response_schema: None,
        })
        .await?;

    info!(
        ?persona,
        subject = %req.subject,
        history_len,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "tutor: model response"
    );

    Ok(ChatReply { text: response.text })
}

#[cfg(test)]
#[path = "tutor_test.rs"]
mod tests;
