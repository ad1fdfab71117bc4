//! Shared fixtures for API integration tests: in-memory stores, scripted
//! notifiers, and request helpers.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::store::{StoreError, SubmissionStore};
use folio_core::submission::{NewSubmission, Submission};
use folio_events::{NotificationDispatcher, Notifier, NotifyError};
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Keeps every inserted submission in memory, assigning sequential ids.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Submission>>,
}

impl MemoryStore {
    pub fn records(&self) -> Vec<Submission> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: NewSubmission) -> Result<Submission, StoreError> {
        let mut records = self.records.lock().unwrap();
        let stored = Submission::from_new(records.len() as i64 + 1, submission);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Refuses every write and counts how often it was asked.
#[derive(Default)]
pub struct FailingStore {
    pub inserts: AtomicUsize,
}

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn insert(&self, _submission: NewSubmission) -> Result<Submission, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused (10.0.0.7:5432)".into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

// ---------------------------------------------------------------------------
// Notifiers
// ---------------------------------------------------------------------------

/// Forwards every notified submission to a channel.
pub struct RecordingNotifier {
    tx: mpsc::UnboundedSender<Submission>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Submission>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let _ = self.tx.send(submission.clone());
        Ok(())
    }
}

/// Simulates an unreachable mail relay.
#[derive(Default)]
pub struct FailingNotifier {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Other("relay unreachable".into()))
    }
}

/// Takes a while to deliver, then counts the delivery.
#[derive(Default)]
pub struct SlowNotifier {
    pub delivered: AtomicUsize,
}

#[async_trait]
impl Notifier for SlowNotifier {
    async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Never finishes on its own.
pub struct HangingNotifier;

#[async_trait]
impl Notifier for HangingNotifier {
    async fn notify(&self, _submission: &Submission) -> Result<(), NotifyError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

pub fn dispatcher(notifier: impl Notifier + 'static) -> NotificationDispatcher {
    NotificationDispatcher::new(Arc::new(notifier), Duration::from_secs(5))
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` serving `public_dir`.
pub fn test_config(public_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        public_dir: public_dir.to_path_buf(),
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        email: None,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(
    store: Arc<dyn SubmissionStore>,
    notifications: NotificationDispatcher,
    public_dir: &Path,
) -> Router {
    let config = test_config(public_dir);
    let state = AppState {
        store,
        notifications,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A public directory with a minimal landing page.
pub fn public_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><title>Portfolio</title><form id=\"contactForm\"></form>",
    )
    .unwrap();
    std::fs::write(dir.path().join("script.js"), "console.log('ok');").unwrap();
    dir
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, json.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
