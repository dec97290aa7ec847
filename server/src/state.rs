//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds only the LLM client: the proxy keeps no per-request or
//! per-session data, so concurrent calls never touch shared mutable state.

use std::sync::Arc;

use crate::llm::LlmChat;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the client is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self { llm }
    }

    /// Borrow the LLM client as a trait object, if configured.
    #[must_use]
    pub fn llm(&self) -> Option<&dyn LlmChat> {
        self.llm.as_deref()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_without_llm_reports_none() {
        let state = test_helpers::test_app_state();
        assert!(state.llm().is_none());
    }

    #[test]
    fn app_state_with_llm_exposes_client() {
        let state = test_helpers::test_app_state_with_llm(Arc::new(test_helpers::MockLlm::replying("hi")));
        assert!(state.llm().is_some());
    }
}
