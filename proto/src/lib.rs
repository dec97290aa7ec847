//! Shared wire model for the `/api/proxy` protocol.
//!
//! This crate owns the JSON representation used by both `server` and `client`.
//! Every request is an envelope `{ "type": <operation tag>, "payload": ... }`;
//! every failure is `{ "error": <message> }` with a non-2xx status.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the single proxy endpoint.
pub const PROXY_PATH: &str = "/api/proxy";

/// Error returned by [`Operation::from_tag`] and [`RawEnvelope::into_request`].
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The `type` field does not name a known operation.
    #[error("unknown operation tag: {0}")]
    UnknownOperation(String),
    /// The payload does not match the shape required by its operation.
    #[error("invalid payload for {operation}: {source}")]
    InvalidPayload {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// ENUMS
// =============================================================================

/// School subject selected in the UI. Also fixes the response language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[default]
    English,
    #[serde(rename = "Svenska")]
    Swedish,
}

impl Subject {
    /// Wire label, as shown in the subject switcher.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Swedish => "Svenska",
        }
    }

    /// BCP-47 language prefix for voices and locale selection.
    #[must_use]
    pub fn lang_prefix(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Swedish => "sv",
        }
    }

    /// Parse a subject from its wire label (case-insensitive), or the
    /// English name "Swedish".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "svenska" | "swedish" | "sv" => Some(Self::Swedish),
            _ => None,
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Operation tag carried in the envelope's `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    GetFeedback,
    GetChatResponse,
    GetTestChatResponse,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetFeedback => "get-feedback",
            Self::GetChatResponse => "get-chat-response",
            Self::GetTestChatResponse => "get-test-chat-response",
        }
    }

    /// Resolve an operation from its wire tag.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownOperation`] for any other tag.
    pub fn from_tag(tag: &str) -> Result<Self, ProtocolError> {
        match tag {
            "get-feedback" => Ok(Self::GetFeedback),
            "get-chat-response" => Ok(Self::GetChatResponse),
            "get-test-chat-response" => Ok(Self::GetTestChatResponse),
            other => Err(ProtocolError::UnknownOperation(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Payload of `get-feedback`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub instructions: String,
    pub student_text: String,
    pub subject: Subject,
}

/// Result of `get-feedback`, as produced by the hosted model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// How well the text followed the instructions, and what was missed.
    pub instruction_following: String,
    /// High-level language advice without pointing out specific errors.
    pub language_feedback: String,
}

/// A single entry in a chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// Payload of `get-chat-response` and `get-test-chat-response`.
///
/// Carries the whole transcript on every turn; the proxy keeps no session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub subject: Subject,
}

/// Result of either chat operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
}

/// Body of every non-2xx proxy response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// Typed request envelope, serialized by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProxyRequest {
    #[serde(rename = "get-feedback")]
    GetFeedback(FeedbackRequest),
    #[serde(rename = "get-chat-response")]
    GetChatResponse(ChatRequest),
    #[serde(rename = "get-test-chat-response")]
    GetTestChatResponse(ChatRequest),
}

impl ProxyRequest {
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::GetFeedback(_) => Operation::GetFeedback,
            Self::GetChatResponse(_) => Operation::GetChatResponse,
            Self::GetTestChatResponse(_) => Operation::GetTestChatResponse,
        }
    }
}

/// Untyped envelope parsed by the server before the tag is checked.
///
/// Splitting the parse lets an unknown tag be told apart from a malformed
/// payload for a known tag.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl RawEnvelope {
    /// Resolve the tag and type the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownOperation`] before looking at the
    /// payload, and [`ProtocolError::InvalidPayload`] when the payload does not
    /// match the operation's shape.
    pub fn into_request(self) -> Result<ProxyRequest, ProtocolError> {
        let operation = Operation::from_tag(&self.kind)?;
        let invalid = |source| ProtocolError::InvalidPayload { operation: operation.as_str(), source };
        match operation {
            Operation::GetFeedback => serde_json::from_value(self.payload)
                .map(ProxyRequest::GetFeedback)
                .map_err(invalid),
            Operation::GetChatResponse => serde_json::from_value(self.payload)
                .map(ProxyRequest::GetChatResponse)
                .map_err(invalid),
            Operation::GetTestChatResponse => serde_json::from_value(self.payload)
                .map(ProxyRequest::GetTestChatResponse)
                .map_err(invalid),
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
