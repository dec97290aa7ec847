//! Feedback service — assignment instructions + student text → two-part feedback.
//!
//! The prompt embeds both texts verbatim and pins the response language to
//! the subject. The declared schema is handed to the model; the reply is parsed
//! directly with no further validation.

use std::fmt::Write;

use proto::{Feedback, FeedbackRequest, Subject};
use serde_json::{Value, json};
use tracing::info;

use super::proxy::ProxyError;
use crate::llm::LlmChat;
use crate::llm::types::{GenerateRequest, Message};

const FEEDBACK_TEMPERATURE: f32 = 0.5;

/// Response schema for `get-feedback`. Both fields are required.
#[must_use]
pub fn feedback_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "instructionFollowing": {
                "type": "string",
                "description": "A summary of how well the student's text followed the provided instructions. Mention any missed points."
            },
            "languageFeedback": {
                "type": "string",
                "description": "General, high-level feedback on language use (e.g., sentence structure, verb tense, word choice) without pointing out specific errors. The tone should be encouraging."
            }
        },
        "required": ["instructionFollowing", "languageFeedback"]
    })
}

pub(crate) fn build_feedback_prompt(instructions: &str, student_text: &str, subject: Subject) -> String {
    let (language_rule, example) = match subject {
        Subject::English => (
            "Your entire response, including all feedback, MUST be in English.",
            "Example: 'Review your sentence structure.' instead of 'You missed a comma here.'",
        ),
        Subject::Swedish => (
            "Your entire response, including all feedback, MUST be in Swedish.",
            "Exempel: 'Se över din meningsbyggnad.' istället för 'Du glömde en punkt här.'",
        ),
    };

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an expert teaching assistant providing feedback on student writing. The subject is {subject}."
    );
    prompt.push_str("Your goal is to be encouraging and helpful without giving away the answers.\n");
    let _ = writeln!(prompt, "{language_rule}\n");
    prompt.push_str(
        "You will be given \"Assignment Instructions\" and the \"Student's Text\".\n\
         Your task is to analyze the student's text based on the instructions and provide feedback in two specific categories.\n\
         You MUST respond in a valid JSON format that matches the provided schema. \
         The JSON keys ('instructionFollowing', 'languageFeedback') must remain in English.\n\n\
         Rules for `instructionFollowing`: Compare text against instructions, state if followed, mention missed parts.\n\
         Rules for `languageFeedback`: Analyze for general patterns. DO NOT correct specific errors. Give high-level advice.\n",
    );
    let _ = writeln!(prompt, "{example}");
    prompt.push_str("The tone should be supportive.\n---\n");
    let _ = writeln!(prompt, "ASSIGNMENT INSTRUCTIONS: {instructions}");
    prompt.push_str("---\n");
    let _ = write!(prompt, "STUDENT'S TEXT: {student_text}");
    prompt
}

pub(crate) fn parse_feedback(text: &str) -> Result<Feedback, ProxyError> {
    serde_json::from_str(text.trim()).map_err(|e| ProxyError::MalformedModelOutput(e.to_string()))
}

/// Ask the model for feedback on one submission.
///
/// # Errors
///
/// Returns [`ProxyError::Llm`] when the model call fails and
/// [`ProxyError::MalformedModelOutput`] when its reply is not the declared JSON.
pub async fn get_feedback(llm: &dyn LlmChat, req: &FeedbackRequest) -> Result<Feedback, ProxyError> {
    let prompt = build_feedback_prompt(&req.instructions, &req.student_text, req.subject);
    let schema = feedback_schema();
    let messages = [Message::user(prompt)];

    let response = llm
        .generate(&GenerateRequest {
            system: None,
            messages: &messages,
            temperature: FEEDBACK_TEMPERATURE,
            response_schema: Some(&schema),
        })
        .await?;

    info!(
        subject = %req.subject,
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "feedback: model response"
    );

    parse_feedback(&response.text)
}

#[cfg(test)]
#[path = "feedback_test.rs"]
mod tests;
