//! Contact form client.
//!
//! Mirrors what the landing page does in the browser: clean the name as it is
//! typed, check every field before anything touches the network, post the
//! form once, and show a short-lived outcome banner.

pub mod controller;
pub mod feedback;
pub mod form;
pub mod transport;

pub use controller::{ContactFormController, SubmitOutcome};
pub use feedback::{Feedback, FeedbackDisplay, Tone};
pub use form::ContactForm;
pub use transport::{ContactTransport, HttpTransport, Reply, TransportError};
