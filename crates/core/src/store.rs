//! The persistence seam the submission handler writes through.
//!
//! `folio-db` provides the PostgreSQL implementation; tests plug in
//! in-memory ones.

use async_trait::async_trait;

use crate::submission::{NewSubmission, Submission};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, pool timeout, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but refused the write.
    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Append-only storage for contact submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Write one submission and return it with its assigned id.
    ///
    /// Each call creates a new record; identical content is not deduplicated.
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError>;

    /// Cheap reachability probe used by the health route.
    async fn ping(&self) -> Result<(), StoreError>;
}
