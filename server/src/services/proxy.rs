//! Proxy dispatch — operation tag → handler → JSON.
//!
//! DESIGN
//! ======
//! The endpoint is stateless: every call carries all the context it needs
//! (for chat, the whole transcript) and the only shared value is the LLM
//! client. Errors collapse into a flat set that maps onto three HTTP statuses:
//! malformed requests are 400, a wrong method is 405, and everything a handler
//! raises (hosted model, parse, empty input) is 500 with the error's message.

use axum::http::StatusCode;
use proto::{ProtocolError, ProxyRequest};
use serde_json::Value;
use tracing::info;

use super::feedback;
use super::tutor::{self, Persona};
use crate::llm::LlmChat;
use crate::llm::types::LlmError;

/// Message used when a handler error carries no text of its own.
pub const INTERNAL_ERROR_FALLBACK: &str = "An internal server error occurred.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Invalid request type")]
    UnknownOperation(String),
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("conversation has no messages")]
    EmptyConversation,
    #[error("{0}")]
    Llm(#[from] LlmError),
    #[error("model returned malformed feedback: {0}")]
    MalformedModelOutput(String),
    #[error("response serialization failed: {0}")]
    Serialize(String),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest | Self::UnknownOperation(_) | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::LlmNotConfigured
            | Self::EmptyConversation
            | Self::Llm(_)
            | Self::MalformedModelOutput(_)
            | Self::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The operation tag behind a [`ProxyError::UnknownOperation`].
    #[must_use]
    pub fn rejected_tag(&self) -> Option<&str> {
        match self {
            Self::UnknownOperation(tag) => Some(tag),
            _ => None,
        }
    }

    /// Text placed in the `{ "error": ... }` body.
    #[must_use]
    pub fn message(&self) -> String {
        message_or_fallback(self.to_string())
    }
}

fn message_or_fallback(message: String) -> String {
    if message.trim().is_empty() { INTERNAL_ERROR_FALLBACK.to_string() } else { message }
}

impl From<ProtocolError> for ProxyError {
    fn from(e: ProtocolError) -> Self {
        match e {
            ProtocolError::UnknownOperation(tag) => Self::UnknownOperation(tag),
            ProtocolError::InvalidPayload { source, .. } => Self::InvalidPayload(source.to_string()),
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run one typed proxy request against the LLM and return its JSON result.
///
/// # Errors
///
/// Returns [`ProxyError::LlmNotConfigured`] when no client is available, and
/// whatever the selected handler raises otherwise.
pub async fn dispatch(llm: Option<&dyn LlmChat>, request: ProxyRequest) -> Result<Value, ProxyError> {
    let operation = request.operation();
    let llm = llm.ok_or(ProxyError::LlmNotConfigured)?;
    info!(%operation, "proxy: dispatch");

    match request {
        ProxyRequest::GetFeedback(req) => to_json(feedback::get_feedback(llm, &req).await?),
        ProxyRequest::GetChatResponse(req) => to_json(tutor::get_chat_response(llm, Persona::Helper, &req).await?),
        ProxyRequest::GetTestChatResponse(req) => {
            to_json(tutor::get_chat_response(llm, Persona::Socratic, &req).await?)
        }
    }
}

fn to_json(value: impl serde::Serialize) -> Result<Value, ProxyError> {
    serde_json::to_value(value).map_err(|e| ProxyError::Serialize(e.to_string()))
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
