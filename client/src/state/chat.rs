//! Chat pages: "Discussion & Help" and "Test".
//!
//! Both pages share one session type; [`ChatMode`] picks the proxy
//! operation and the fallback text shown when a call fails. The whole
//! transcript is sent on every turn.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use proto::{ChatMessage, ChatReply, ChatRequest, Subject};

use tracing::warn;

use crate::net::{ClientError, TutorApi};

pub const DISCUSSION_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";
pub const TEST_FALLBACK: &str = "Sorry, I encountered an error in the test environment. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatMode {
    /// Open-ended helper persona.
    Discussion,
    /// Structured Socratic tutor.
    Test,
}

impl ChatMode {
    /// Model-turn text appended when the call fails.
    #[must_use]
    pub fn fallback_text(self) -> &'static str {
        match self {
            Self::Discussion => DISCUSSION_FALLBACK,
            Self::Test => TEST_FALLBACK,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    pub mode: ChatMode,
    subject: Subject,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
}

impl ChatSession {
    #[must_use]
    pub fn new(mode: ChatMode, subject: Subject) -> Self {
        Self { mode, subject, messages: Vec::new(), input: String::new(), loading: false }
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Switch subject. A different subject starts a new session.
    pub fn set_subject(&mut self, subject: Subject) {
        if subject != self.subject {
            self.subject = subject;
            self.messages.clear();
        }
    }

    /// Whether the send control is enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Append the trimmed input as a user turn and enter the loading state.
    ///
    /// Returns the request carrying the full transcript, or `None` when the
    /// input is blank or a call is already in flight.
    pub fn begin_send(&mut self) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }
        let text = self.input.trim().to_string();
        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.loading = true;
        Some(ChatRequest { messages: self.messages.clone(), subject: self.subject })
    }

    /// Append exactly one model turn: the reply, or the mode's fallback.
    pub fn finish_send(&mut self, result: Result<ChatReply, ClientError>) {
        let text = match result {
            Ok(reply) => reply.text,
            Err(e) => {
                warn!(mode = ?self.mode, error = e.user_message(), "chat: reply failed");
                self.mode.fallback_text().to_string()
            }
        };
        self.messages.push(ChatMessage::model(text));
        self.loading = false;
    }

    /// Send the current input and wait for the reply.
    ///
    /// Returns `false` when nothing was sent.
    pub async fn send(&mut self, api: &dyn TutorApi) -> bool {
        let Some(request) = self.begin_send() else {
            return false;
        };
        let result = match self.mode {
            ChatMode::Discussion => api.get_chat_response(request).await,
            ChatMode::Test => api.get_test_chat_response(request).await,
        };
        self.finish_send(result);
        true
    }
}
