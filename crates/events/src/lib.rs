//! Submission notifications.
//!
//! - [`Notifier`] — the seam the submission handler notifies through.
//! - [`delivery`] — concrete channels (SMTP email).
//! - [`NotificationDispatcher`] — runs each notification as a tracked,
//!   time-bounded task so the HTTP response never waits on the mail relay.

pub mod delivery;
pub mod dispatch;
pub mod notifier;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use dispatch::NotificationDispatcher;
pub use notifier::{Notifier, NotifyError};
