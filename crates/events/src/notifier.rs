//! The notification seam: anything that can tell the site owner about a new
//! submission.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::submission::Submission;

use crate::delivery::email::EmailError;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error("Notification timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Notification failed: {0}")]
    Other(String),
}

/// Sends one notification per stored submission.
///
/// Implementations make a single attempt; callers never retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError>;
}
