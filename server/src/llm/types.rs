//! LLM types — provider-neutral request/response types and errors.
//!
//! Shared by the Gemini and `OpenAI` clients. Requests borrow their text so a
//! handler can build one from the incoming payload without copying it.

use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider answered but produced no text (blocked or truncated).
    #[error("model returned no text (reason: {reason})")]
    EmptyResponse { reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Whether a caller could reasonably try the same request again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// Speaker of a conversation turn. Gemini calls the assistant side `model`;
/// the `OpenAI` client maps it to `assistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// One generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    /// System instruction conditioning the model (persona), if any.
    pub system: Option<&'a str>,
    /// Conversation so far; the last entry is the turn being answered.
    pub messages: &'a [Message],
    pub temperature: f32,
    /// JSON schema the output must follow. Presence switches the provider to
    /// JSON output mode.
    pub response_schema: Option<&'a Value>,
}

/// Response from an LLM generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub text: String,
    pub model: String,
    pub finish_reason: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// LLM CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for LLM generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// Send a generation request to the LLM provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is malformed,
    /// or the provider produced no text.
    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<GenerateResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
