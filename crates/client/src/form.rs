//! Contact form field state.

use folio_core::contact::{sanitize_name, validate_form, ContactFields};
use folio_core::error::CoreError;

/// The four raw input values, exactly as typed (after live name cleanup).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name input handler: keeps only letters and whitespace.
    pub fn on_name_input(&mut self, raw: &str) {
        self.name = sanitize_name(raw);
    }

    pub fn set_email(&mut self, raw: impl Into<String>) {
        self.email = raw.into();
    }

    pub fn set_phone(&mut self, raw: impl Into<String>) {
        self.phone = raw.into();
    }

    pub fn set_message(&mut self, raw: impl Into<String>) {
        self.message = raw.into();
    }

    /// Trim and check every field, first failure wins.
    pub fn validate(&self) -> Result<ContactFields, CoreError> {
        validate_form(&self.name, &self.email, &self.phone, &self.message)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
