//! LLM — multi-provider adapter for the hosted generative model.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` dispatches to
//! Gemini (default) or an OpenAI-compatible API based on `LLM_PROVIDER`.
//! Handlers only see the [`LlmChat`] trait so tests can substitute a mock.

pub mod config;
pub mod gemini;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{GenerateRequest, GenerateResponse, LlmError};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Gemini or `OpenAI`.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables (see [`LlmConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::Gemini => {
                LlmProvider::Gemini(gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => {
                LlmProvider::OpenAi(openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<GenerateResponse, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate(&self.model, request).await,
            LlmProvider::OpenAi(c) => c.generate(&self.model, request).await,
        }
    }
}
