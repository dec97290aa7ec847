//! HTTP client for the `/api/proxy` endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is logged here with its cause and returned as a
//! [`ClientError`]. Pages never show the cause: they show
//! [`ClientError::user_message`] (or their own fixed text) so a quota error
//! and a dropped connection look the same to the student. One attempt per
//! call; no retry.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use async_trait::async_trait;
use proto::{ChatReply, ChatRequest, ErrorBody, Feedback, FeedbackRequest, Operation, ProxyRequest};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

pub const FEEDBACK_USER_MESSAGE: &str = "Failed to get feedback from the AI model.";
pub const CHAT_USER_MESSAGE: &str = "Failed to get a response from the chat model.";

const FEEDBACK_SERVER_FALLBACK: &str = "Failed to fetch feedback from the server.";
const CHAT_SERVER_FALLBACK: &str = "Failed to fetch chat response from the server.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The proxy answered with a non-success status.
    #[error("{operation}: server returned {status}: {message}")]
    Server { operation: Operation, status: u16, message: String },

    /// The request never produced a response.
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// A success response whose body did not match the expected shape.
    #[error("{operation}: response decode failed: {detail}")]
    Decode { operation: Operation, detail: String },

    #[error("HTTP client build failed: {0}")]
    Build(String),
}

impl ClientError {
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Server { operation, .. } | Self::Transport { operation, .. } | Self::Decode { operation, .. } => {
                Some(*operation)
            }
            Self::Build(_) => None,
        }
    }

    /// Generic text for the student, chosen by operation only.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self.operation() {
            Some(Operation::GetFeedback) => FEEDBACK_USER_MESSAGE,
            Some(Operation::GetChatResponse | Operation::GetTestChatResponse) | None => CHAT_USER_MESSAGE,
        }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// The three proxy operations, as seen by page state.
#[async_trait]
pub trait TutorApi: Send + Sync {
    async fn get_feedback(&self, request: FeedbackRequest) -> Result<Feedback, ClientError>;
    async fn get_chat_response(&self, request: ChatRequest) -> Result<ChatReply, ClientError>;
    async fn get_test_chat_response(&self, request: ChatRequest) -> Result<ChatReply, ClientError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// Client for the proxy under `base_url`, with no request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::build(base_url, None)
    }

    /// Same as [`ProxyClient::new`] with a whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the HTTP client cannot be constructed.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self { http, endpoint: proxy_endpoint(base_url) })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one envelope and decode the success body as `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, non-success status, or
    /// an undecodable body. The error is logged before it is returned.
    pub async fn dispatch<T: DeserializeOwned>(&self, request: &ProxyRequest) -> Result<T, ClientError> {
        let operation = request.operation();
        debug!(%operation, endpoint = %self.endpoint, "proxy: send");
        let result = self.send(operation, request).await;
        if let Err(e) = &result {
            error!(%operation, error = %e, "proxy: call failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, operation: Operation, request: &ProxyRequest) -> Result<T, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;

        if !status.is_success() {
            return Err(ClientError::Server {
                operation,
                status: status.as_u16(),
                message: server_error_message(operation, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode { operation, detail: e.to_string() })
    }
}

#[async_trait]
impl TutorApi for ProxyClient {
    async fn get_feedback(&self, request: FeedbackRequest) -> Result<Feedback, ClientError> {
        self.dispatch(&ProxyRequest::GetFeedback(request)).await
    }

    async fn get_chat_response(&self, request: ChatRequest) -> Result<ChatReply, ClientError> {
        self.dispatch(&ProxyRequest::GetChatResponse(request)).await
    }

    async fn get_test_chat_response(&self, request: ChatRequest) -> Result<ChatReply, ClientError> {
        self.dispatch(&ProxyRequest::GetTestChatResponse(request)).await
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn proxy_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), proto::PROXY_PATH)
}

/// The body's `error` field, or the operation's fallback when it is absent.
fn server_error_message(operation: Operation, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| server_fallback(operation).to_string())
}

fn server_fallback(operation: Operation) -> &'static str {
    match operation {
        Operation::GetFeedback => FEEDBACK_SERVER_FALLBACK,
        Operation::GetChatResponse | Operation::GetTestChatResponse => CHAT_SERVER_FALLBACK,
    }
}
