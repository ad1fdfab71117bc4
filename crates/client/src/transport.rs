//! Sending a validated form to the submission endpoint.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::contact::{ContactRequest, ContactResponse};

/// HTTP request timeout for a single submission.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The request never produced a response (DNS, refused, reset, timeout).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// What came back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    /// Parsed envelope; `None` when the body was not the expected JSON.
    pub body: Option<ContactResponse>,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-supplied message, if any and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .map(|b| b.message.as_str())
            .filter(|m| !m.is_empty())
    }
}

/// Posts one contact request. Implementations make a single attempt.
#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn post_contact(&self, request: &ContactRequest) -> Result<Reply, TransportError>;
}

/// [`ContactTransport`] over HTTP with `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `base_url` is the site root, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/contact", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn post_contact(&self, request: &ContactRequest) -> Result<Reply, TransportError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status().as_u16();
        let body = response.json::<ContactResponse>().await.ok();
        Ok(Reply { status, body })
    }
}
