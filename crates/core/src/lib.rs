//! Domain types and rules for the portfolio contact pipeline.
//!
//! Everything here is free of I/O: the wire contract for `POST /contact`,
//! the field rules, the `Submission` model and the storage seam.

pub mod contact;
pub mod error;
pub mod store;
pub mod submission;
pub mod types;
