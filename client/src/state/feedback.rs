//! "Check Assignment" page: instructions + student text → feedback.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use proto::{Feedback, FeedbackRequest, Subject};

use tracing::warn;

use crate::i18n::Translations;
use crate::net::{ClientError, TutorApi};

/// Shown for any failed feedback call, whatever the cause.
pub const FEEDBACK_FAILED_MESSAGE: &str = "An error occurred while generating feedback. Please try again.";

#[derive(Clone, Debug, Default)]
pub struct CheckAssignmentState {
    pub instructions: String,
    pub student_text: String,
    pub feedback: Option<Feedback>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CheckAssignmentState {
    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.loading && has_text(&self.instructions) && has_text(&self.student_text)
    }

    /// Validate and enter the loading state.
    ///
    /// Returns the request to send, or `None` when either field is blank (the
    /// localized validation message is set) or a call is already in flight.
    pub fn begin_submit(&mut self, subject: Subject, t: &Translations) -> Option<FeedbackRequest> {
        if self.loading {
            return None;
        }
        if !has_text(&self.instructions) || !has_text(&self.student_text) {
            self.error = Some(t.error_message.to_string());
            return None;
        }
        self.loading = true;
        self.error = None;
        self.feedback = None;
        Some(FeedbackRequest {
            instructions: self.instructions.clone(),
            student_text: self.student_text.clone(),
            subject,
        })
    }

    /// Leave the loading state with the call's outcome.
    pub fn finish_submit(&mut self, result: Result<Feedback, ClientError>) {
        match result {
            Ok(feedback) => self.feedback = Some(feedback),
            Err(e) => {
                warn!(error = e.user_message(), "check: feedback failed");
                self.error = Some(FEEDBACK_FAILED_MESSAGE.to_string());
            }
        }
        self.loading = false;
    }

    /// Validate, call the proxy, and record the result.
    ///
    /// Returns `false` when nothing was sent.
    pub async fn submit(&mut self, api: &dyn TutorApi, subject: Subject, t: &Translations) -> bool {
        let Some(request) = self.begin_submit(subject, t) else {
            return false;
        };
        let result = api.get_feedback(request).await;
        self.finish_submit(result);
        true
    }

    /// Reset both inputs and any result.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}
