//! Fire-and-forget notification dispatch.
//!
//! [`NotificationDispatcher::dispatch`] hands a stored submission to a tracked
//! tokio task and returns immediately. The task makes one bounded attempt and
//! only logs the outcome; nothing flows back to the request that triggered it.
//! On shutdown, [`NotificationDispatcher::drain`] waits for tasks still in
//! flight so their outcome is logged before the runtime goes away.

use std::sync::Arc;
use std::time::Duration;

use folio_core::submission::Submission;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::Instrument;

use crate::notifier::{Notifier, NotifyError};

/// Slack on top of the per-attempt timeout when draining at shutdown.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Shared, cheaply cloneable handle to the configured notifier (if any).
///
/// Clones share one task tracker, so draining any clone waits for every
/// notification started through the others.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Option<Arc<dyn Notifier>>,
    timeout: Duration,
    tasks: TaskTracker,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self {
            notifier: Some(notifier),
            timeout,
            tasks: TaskTracker::new(),
        }
    }

    /// A dispatcher that skips every notification.
    pub fn disabled() -> Self {
        Self {
            notifier: None,
            timeout: Duration::ZERO,
            tasks: TaskTracker::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Start a notification for `submission` without waiting for it.
    ///
    /// Returns the task handle so callers that care can await it; the request
    /// path drops it and relies on [`drain`](Self::drain) at shutdown.
    /// Returns `None` when no notifier is configured.
    pub fn dispatch(&self, submission: Submission) -> Option<JoinHandle<()>> {
        let Some(notifier) = self.notifier.clone() else {
            tracing::info!(
                submission_id = submission.id,
                "Email not configured, skipping notification"
            );
            return None;
        };

        let timeout = self.timeout;
        let span = tracing::info_span!("notify", submission_id = submission.id);

        Some(self.tasks.spawn(
            async move {
                match notify_bounded(notifier.as_ref(), &submission, timeout).await {
                    Ok(()) => tracing::info!("Notification delivered"),
                    Err(e) => tracing::warn!(error = %e, "Notification failed"),
                }
            }
            .instrument(span),
        ))
    }

    /// Number of notifications still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for in-flight notifications to finish, bounded by the attempt
    /// timeout plus a small grace period.
    ///
    /// Returns `false` if some were still running when the bound expired.
    pub async fn drain(&self) -> bool {
        self.tasks.close();

        let pending = self.tasks.len();
        if pending == 0 {
            return true;
        }
        tracing::info!(pending, "Waiting for in-flight notifications");

        match tokio::time::timeout(self.timeout + DRAIN_GRACE, self.tasks.wait()).await {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    pending = self.tasks.len(),
                    "Notifications still running at shutdown"
                );
                false
            }
        }
    }
}

/// Run one notification attempt, giving up after `timeout`.
pub async fn notify_bounded(
    notifier: &dyn Notifier,
    submission: &Submission,
    timeout: Duration,
) -> Result<(), NotifyError> {
    match tokio::time::timeout(timeout, notifier.notify(submission)).await {
        Ok(result) => result,
        Err(_) => Err(NotifyError::TimedOut(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    fn submission() -> Submission {
        Submission {
            id: 42,
            name: "Jane".into(),
            email: "a@b.co".into(),
            phone: "9876543210".into(),
            message: "Hello".into(),
            date: Utc::now(),
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
            Err(NotifyError::Other("relay unreachable".into()))
        }
    }

    #[derive(Default)]
    struct SlowNotifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for SlowNotifier {
        async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct HangingNotifier;

    #[async_trait]
    impl Notifier for HangingNotifier {
        async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn disabled_dispatcher_skips() {
        let dispatcher = NotificationDispatcher::disabled();
        assert!(!dispatcher.is_enabled());
        assert!(dispatcher.dispatch(submission()).is_none());
    }

    #[tokio::test]
    async fn dispatch_calls_notifier_once() {
        let notifier = Arc::new(CountingNotifier::default());
        let dispatcher = NotificationDispatcher::new(notifier.clone(), Duration::from_secs(1));

        let handle = dispatcher.dispatch(submission()).expect("enabled");
        handle.await.unwrap();

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_notifier_does_not_panic_task() {
        let dispatcher =
            NotificationDispatcher::new(Arc::new(FailingNotifier), Duration::from_secs(1));
        let handle = dispatcher.dispatch(submission()).expect("enabled");
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn bounded_notify_times_out() {
        let result =
            notify_bounded(&HangingNotifier, &submission(), Duration::from_millis(20)).await;
        assert_matches!(result, Err(NotifyError::TimedOut(d)) if d == Duration::from_millis(20));
    }

    #[tokio::test]
    async fn bounded_notify_passes_errors_through() {
        let result = notify_bounded(&FailingNotifier, &submission(), Duration::from_secs(1)).await;
        assert_matches!(result, Err(NotifyError::Other(_)));
    }

    #[tokio::test]
    async fn hanging_notifier_task_finishes_after_timeout() {
        let dispatcher =
            NotificationDispatcher::new(Arc::new(HangingNotifier), Duration::from_millis(20));
        let handle = dispatcher.dispatch(submission()).expect("enabled");

        let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
        assert!(joined.is_ok(), "task must end once its own timeout fires");
    }

    #[tokio::test]
    async fn drain_waits_for_dropped_handles() {
        let notifier = Arc::new(SlowNotifier::default());
        let dispatcher = NotificationDispatcher::new(notifier.clone(), Duration::from_secs(1));

        drop(dispatcher.dispatch(submission()));
        drop(dispatcher.clone().dispatch(submission()));
        assert_eq!(dispatcher.in_flight(), 2);

        assert!(dispatcher.drain().await);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[tokio::test]
    async fn drain_ends_once_hanging_attempts_time_out() {
        let dispatcher =
            NotificationDispatcher::new(Arc::new(HangingNotifier), Duration::from_millis(20));
        drop(dispatcher.dispatch(submission()));

        let drained = tokio::time::timeout(Duration::from_secs(2), dispatcher.drain()).await;
        assert_matches!(drained, Ok(true));
    }

    #[tokio::test]
    async fn drain_with_nothing_in_flight_returns_immediately() {
        assert!(NotificationDispatcher::disabled().drain().await);
    }
}
