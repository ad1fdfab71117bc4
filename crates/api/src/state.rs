use std::sync::Arc;

use folio_core::store::SubmissionStore;
use folio_events::NotificationDispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Where submissions are written.
    pub store: Arc<dyn SubmissionStore>,
    /// Fire-and-forget notification of stored submissions.
    pub notifications: NotificationDispatcher,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
