//! Submit flow: validate → send → show outcome.

use folio_core::contact::ContactRequest;

use crate::feedback::{Feedback, FeedbackDisplay};
use crate::form::ContactForm;
use crate::transport::ContactTransport;

pub const MSG_SENT_FALLBACK: &str = "Your message has been sent successfully!";
pub const MSG_FAILED_FALLBACK: &str = "Something went wrong!";
pub const MSG_UNREACHABLE: &str = "Server not responding. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field rule failed; nothing was sent.
    Rejected,
    /// The server stored the submission.
    Accepted,
    /// The server answered with a non-2xx status.
    Failed { status: u16 },
    /// No response at all.
    Unreachable,
}

/// Owns the form, its feedback banner, and the transport.
pub struct ContactFormController<T> {
    pub form: ContactForm,
    pub feedback: FeedbackDisplay,
    transport: T,
}

impl<T: ContactTransport> ContactFormController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            form: ContactForm::new(),
            feedback: FeedbackDisplay::default(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle a submit: one attempt, no retries.
    ///
    /// Fields are cleared only when the server accepted the submission.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let fields = match self.form.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.feedback.show(Feedback::error(e.public_message()));
                return SubmitOutcome::Rejected;
            }
        };

        match self.transport.post_contact(&ContactRequest::from(fields)).await {
            Ok(reply) if reply.is_success() => {
                let text = reply.message().unwrap_or(MSG_SENT_FALLBACK);
                self.feedback.show(Feedback::success(text));
                self.form.clear();
                SubmitOutcome::Accepted
            }
            Ok(reply) => {
                let text = reply.message().unwrap_or(MSG_FAILED_FALLBACK);
                self.feedback.show(Feedback::error(text));
                SubmitOutcome::Failed {
                    status: reply.status,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact request failed");
                self.feedback.show(Feedback::error(MSG_UNREACHABLE));
                SubmitOutcome::Unreachable
            }
        }
    }
}
