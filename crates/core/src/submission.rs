//! The `Submission` record and its pre-write form.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::contact::ContactFields;
use crate::types::{DbId, Timestamp};

/// A validated submission stamped with its server-side receive time.
///
/// The timestamp is taken once, here, and travels unchanged into the store
/// and the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub submitted_at: Timestamp,
}

impl NewSubmission {
    /// Stamp validated fields with the current wall-clock time.
    pub fn stamp(fields: ContactFields) -> Self {
        Self::stamp_at(fields, Utc::now())
    }

    pub fn stamp_at(fields: ContactFields, submitted_at: Timestamp) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            message: fields.message,
            submitted_at,
        }
    }
}

/// A stored contact submission. Never updated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub date: Timestamp,
}

impl Submission {
    /// Build the stored form of `new` once the store has assigned an id.
    pub fn from_new(id: DbId, new: NewSubmission) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            phone: new.phone,
            message: new.message,
            date: new.submitted_at,
        }
    }
}
