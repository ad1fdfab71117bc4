//! [`SubmissionStore`] backed by the `submissions` table.

use async_trait::async_trait;
use folio_core::store::{StoreError, SubmissionStore};
use folio_core::submission::{NewSubmission, Submission};

use crate::repositories::SubmissionRepo;
use crate::DbPool;

/// PostgreSQL-backed submission store sharing the process-wide pool.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: DbPool,
}

impl PgSubmissionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let row = SubmissionRepo::create(&self.pool, &submission)
            .await
            .map_err(classify_sqlx_error)?;
        tracing::debug!(id = row.id, "Submission row inserted");
        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }
}

/// Split sqlx failures into "could not reach the database" and "the database
/// said no".
fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
        other => StoreError::Rejected(other.to_string()),
    }
}
