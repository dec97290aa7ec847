//! Top-level shell: active page and subject.
//!
//! SYSTEM CONTEXT
//! ==============
//! The subject picks the UI language and the language the tutor answers in.
//! Switching it propagates to every page that depends on it; chat sessions
//! start over.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use proto::Subject;

use super::chat::{ChatMode, ChatSession};
use super::feedback::CheckAssignmentState;
use super::speech::{AudioPlayer, SpeechEngine};
use crate::i18n::Translations;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Check,
    Discuss,
    Test,
    Audio,
}

impl Page {
    pub const ALL: [Self; 4] = [Self::Check, Self::Discuss, Self::Test, Self::Audio];

    /// Tab label.
    #[must_use]
    pub fn label(self, t: &Translations) -> &'static str {
        match self {
            Self::Check => t.check_assignment,
            Self::Discuss => t.discussion_and_help,
            Self::Test => t.test,
            Self::Audio => t.audio_support,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppShell {
    pub page: Page,
    subject: Subject,
    pub check: CheckAssignmentState,
    pub discussion: ChatSession,
    pub test: ChatSession,
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new(Subject::default())
    }
}

impl AppShell {
    #[must_use]
    pub fn new(subject: Subject) -> Self {
        Self {
            page: Page::default(),
            subject,
            check: CheckAssignmentState::default(),
            discussion: ChatSession::new(ChatMode::Discussion, subject),
            test: ChatSession::new(ChatMode::Test, subject),
        }
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Switch subject and propagate it to the chat pages.
    ///
    /// The shell does not own the audio player (its engine is platform
    /// specific). Embedders with one use [`AppShell::set_subject_with_audio`].
    pub fn set_subject(&mut self, subject: Subject) {
        self.subject = subject;
        self.discussion.set_subject(subject);
        self.test.set_subject(subject);
    }

    /// [`AppShell::set_subject`] plus the audio page's voice selection.
    pub fn set_subject_with_audio<E: SpeechEngine>(&mut self, subject: Subject, audio: &mut AudioPlayer<E>) {
        self.set_subject(subject);
        audio.set_subject(subject);
    }

    #[must_use]
    pub fn translations(&self) -> &'static Translations {
        Translations::for_subject(self.subject)
    }

    /// The chat session behind the current page, if it is a chat page.
    pub fn active_chat(&mut self) -> Option<&mut ChatSession> {
        match self.page {
            Page::Discuss => Some(&mut self.discussion),
            Page::Test => Some(&mut self.test),
            Page::Check | Page::Audio => None,
        }
    }
}
