//! Email notification delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to mail the site
//! owner a summary of each new submission. Configuration is loaded from
//! environment variables; if `EMAIL_USER` or `EMAIL_PASS` is not set,
//! [`EmailConfig::from_env`] returns `None` and notifications are skipped.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::submission::Submission;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::notifier::{Notifier, NotifyError};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP relay (Gmail, STARTTLS).
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Display name on the sender mailbox when `EMAIL_FROM_NAME` is not set.
const DEFAULT_FROM_NAME: &str = "Portfolio";

/// Upper bound on one notification attempt when `NOTIFY_TIMEOUT_SECS` is not set.
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// SMTP username; also the sender address.
    pub user: String,
    /// SMTP password.
    pub password: String,
    /// Where notifications go (defaults to `user`).
    pub to_address: String,
    /// Display name on the sender mailbox.
    pub from_name: String,
    /// Bound on a single send, covering connect, auth and data.
    pub timeout: Duration,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable              | Required | Default          |
    /// |-----------------------|----------|------------------|
    /// | `EMAIL_USER`          | yes      | -                |
    /// | `EMAIL_PASS`          | yes      | -                |
    /// | `SMTP_HOST`           | no       | `smtp.gmail.com` |
    /// | `SMTP_PORT`           | no       | `587`            |
    /// | `EMAIL_TO`            | no       | `EMAIL_USER`     |
    /// | `EMAIL_FROM_NAME`     | no       | `Portfolio`      |
    /// | `NOTIFY_TIMEOUT_SECS` | no       | `10`             |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    ///
    /// Blank values count as unset. Unparsable numbers fall back to the
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user = get("EMAIL_USER")?;
        let password = get("EMAIL_PASS")?;

        Some(Self {
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: get("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            to_address: get("EMAIL_TO").unwrap_or_else(|| user.clone()),
            from_name: get("EMAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            timeout: get("NOTIFY_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_NOTIFY_TIMEOUT),
            user,
            password,
        })
    }
}

// ---------------------------------------------------------------------------
// Message rendering
// ---------------------------------------------------------------------------

/// Subject line for a submission notification.
pub fn render_subject(submission: &Submission) -> String {
    format!("New Portfolio Contact from {}", submission.name)
}

/// Plain-text body listing every field and the receive time.
pub fn render_text(submission: &Submission) -> String {
    format!(
        "New Contact Message\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Message:\n{}\n\n\
         Received on: {}\n",
        submission.name,
        submission.email,
        submission.phone,
        submission.message,
        format_received(submission),
    )
}

/// HTML body. Visitor-supplied text is escaped.
pub fn render_html(submission: &Submission) -> String {
    format!(
        "<h2>New Contact Message</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Phone:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <blockquote style=\"border-left:4px solid #14b8a6;padding-left:12px;\">{}</blockquote>\n\
         <p><strong>Received on:</strong> {}</p>\n",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(&submission.phone),
        escape_html(&submission.message).replace('\n', "<br>"),
        format_received(submission),
    )
}

fn format_received(submission: &Submission) -> String {
    submission.date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Assemble the notification message for `submission`.
///
/// The visitor's address becomes `Reply-To` when it parses.
pub fn compose(
    from: &Mailbox,
    to: &Mailbox,
    submission: &Submission,
) -> Result<Message, EmailError> {
    let mut builder = Message::builder()
        .from(from.clone())
        .to(to.clone())
        .subject(render_subject(submission));

    if let Ok(address) = submission.email.parse::<Address>() {
        builder = builder.reply_to(Mailbox::new(Some(submission.name.clone()), address));
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            render_text(submission),
            render_html(submission),
        ))
        .map_err(|e| EmailError::Build(e.to_string()))
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Mails the site owner about new submissions via SMTP.
///
/// The transport is built once and shared by every send.
pub struct EmailDelivery {
    from: Mailbox,
    to: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    /// Build the sender/recipient mailboxes and the SMTP transport.
    ///
    /// Fails on an unparsable address or relay host; nothing is sent yet.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let from = Mailbox::new(Some(config.from_name.clone()), config.user.parse()?);
        let to = Mailbox::new(None, config.to_address.parse()?);

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { from, to, mailer })
    }

    /// Send one notification for `submission`.
    pub async fn deliver(&self, submission: &Submission) -> Result<(), EmailError> {
        let email = compose(&self.from, &self.to, submission)?;
        self.mailer.send(email).await?;

        tracing::info!(
            to = %self.to,
            submission_id = submission.id,
            "Notification email sent"
        );
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailDelivery {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        self.deliver(submission).await.map_err(NotifyError::from)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
