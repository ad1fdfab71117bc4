//! Contact form contract shared by the submission handler and the form client.
//!
//! Holds the wire types for `POST /contact`, the field patterns both sides
//! enforce, and the presence check the server applies before the patterns.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Letters and whitespace only, at least one character.
pub const NAME_PATTERN: &str = r"^[A-Za-z\s]+$";

/// `local@domain.tld` with no whitespace and a single `@`.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Ten ASCII digits, leading digit 6-9 (Indian mobile number shape).
pub const PHONE_PATTERN: &str = r"^[6-9][0-9]{9}$";

pub const MSG_INVALID_NAME: &str = "Full Name should contain only letters.";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_INVALID_PHONE: &str = "Enter valid 10-digit Indian phone number.";
pub const MSG_EMPTY_MESSAGE: &str = "Message cannot be empty.";

/// Returned with 400 when any field is missing or blank.
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";

/// Returned with 400 when the body is not a JSON object of string fields.
pub const MSG_INVALID_BODY: &str = "Invalid request body";

/// Returned with 200 once the submission is stored.
pub const MSG_SUBMITTED: &str = "Message sent successfully!";

/// Returned with 500 when the store rejects or cannot take the write.
pub const MSG_SERVER_FAILURE: &str = "Something went wrong";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of `POST /contact`.
///
/// Every field is optional on the way in so that a missing key or an explicit
/// `null` is reported as "All fields are required" rather than as a decode
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            message: Some(message.into()),
        }
    }

    /// Server-side presence check.
    ///
    /// Trims every field and fails with [`MSG_FIELDS_REQUIRED`] if any of them
    /// is absent or blank. Field shapes are checked separately by
    /// [`ContactFields::check_rules`].
    pub fn require_fields(&self) -> Result<ContactFields, CoreError> {
        fn present(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        match (
            present(&self.name),
            present(&self.email),
            present(&self.phone),
            present(&self.message),
        ) {
            (Some(name), Some(email), Some(phone), Some(message)) => Ok(ContactFields {
                name,
                email,
                phone,
                message,
            }),
            _ => Err(CoreError::Validation(MSG_FIELDS_REQUIRED.to_string())),
        }
    }
}

/// Four trimmed, non-empty contact fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactFields {
    /// Apply the field rules in form order, stopping at the first failure.
    pub fn check_rules(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        validate_message(&self.message)
    }
}

impl From<ContactFields> for ContactRequest {
    fn from(fields: ContactFields) -> Self {
        ContactRequest::new(fields.name, fields.email, fields.phone, fields.message)
    }
}

/// Body of every `POST /contact` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Drop every character that is not an ASCII letter or whitespace.
///
/// Applied live to the name field as the visitor types.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    check(&NAME_RE, name, MSG_INVALID_NAME)
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    check(&EMAIL_RE, email, MSG_INVALID_EMAIL)
}

pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    check(&PHONE_RE, phone, MSG_INVALID_PHONE)
}

pub fn validate_message(message: &str) -> Result<(), CoreError> {
    if message.is_empty() {
        return Err(CoreError::Validation(MSG_EMPTY_MESSAGE.to_string()));
    }
    Ok(())
}

/// Trim the four raw form values and apply the field rules in form order,
/// stopping at the first failure.
pub fn validate_form(
    name: &str,
    email: &str,
    phone: &str,
    message: &str,
) -> Result<ContactFields, CoreError> {
    let fields = ContactFields {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        phone: phone.trim().to_string(),
        message: message.trim().to_string(),
    };

    fields.check_rules()?;
    Ok(fields)
}

fn check(re: &Regex, value: &str, message: &str) -> Result<(), CoreError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn rejection(result: Result<(), CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    // -- sanitize_name --

    #[test]
    fn sanitize_strips_digits_and_punctuation() {
        assert_eq!(sanitize_name("John123 O'Neil!"), "John ONeil");
    }

    #[test]
    fn sanitize_keeps_whitespace() {
        assert_eq!(sanitize_name("Mary  Ann\t"), "Mary  Ann\t");
    }

    // -- validate_name --

    #[test]
    fn name_with_digits_rejected() {
        assert_eq!(rejection(validate_name("John123")), MSG_INVALID_NAME);
    }

    #[test]
    fn name_with_spaces_accepted() {
        assert!(validate_name("Jane Doe").is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(rejection(validate_name("")), MSG_INVALID_NAME);
    }

    // -- validate_email --

    #[test]
    fn email_without_at_rejected() {
        assert_eq!(rejection(validate_email("not-an-email")), MSG_INVALID_EMAIL);
    }

    #[test]
    fn short_email_accepted() {
        assert!(validate_email("a@b.co").is_ok());
    }

    #[test]
    fn email_without_dot_in_domain_rejected() {
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn email_with_two_ats_rejected() {
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn email_with_inner_space_rejected() {
        assert!(validate_email("a b@c.com").is_err());
    }

    // -- validate_phone --

    #[test]
    fn short_phone_rejected() {
        assert_eq!(rejection(validate_phone("12345")), MSG_INVALID_PHONE);
    }

    #[test]
    fn phone_with_leading_five_rejected() {
        assert_eq!(rejection(validate_phone("5123456789")), MSG_INVALID_PHONE);
    }

    #[test]
    fn indian_mobile_accepted() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("6000000000").is_ok());
    }

    #[test]
    fn eleven_digit_phone_rejected() {
        assert!(validate_phone("98765432101").is_err());
    }

    #[test]
    fn non_ascii_digits_rejected() {
        // Devanagari digits are Unicode \d but not accepted.
        assert!(validate_phone("९८७६५४३२१०").is_err());
    }

    // -- validate_form --

    #[test]
    fn form_checks_run_in_order() {
        let err = validate_form("John123", "bad", "1", "").unwrap_err();
        assert_eq!(err.public_message(), MSG_INVALID_NAME);

        let err = validate_form("John", "bad", "1", "").unwrap_err();
        assert_eq!(err.public_message(), MSG_INVALID_EMAIL);

        let err = validate_form("John", "j@x.io", "1", "").unwrap_err();
        assert_eq!(err.public_message(), MSG_INVALID_PHONE);

        let err = validate_form("John", "j@x.io", "9876543210", "   ").unwrap_err();
        assert_eq!(err.public_message(), MSG_EMPTY_MESSAGE);
    }

    #[test]
    fn form_trims_before_checking() {
        let fields = validate_form("  Jane  ", " a@b.co ", " 9876543210 ", " hi ").unwrap();
        assert_eq!(fields.name, "Jane");
        assert_eq!(fields.email, "a@b.co");
        assert_eq!(fields.phone, "9876543210");
        assert_eq!(fields.message, "hi");
    }

    // -- require_fields --

    #[test]
    fn require_fields_accepts_complete_request() {
        let req = ContactRequest::new("Jane", "a@b.co", "9876543210", "Hello");
        let fields = req.require_fields().unwrap();
        assert_eq!(fields.name, "Jane");
    }

    #[test]
    fn require_fields_rejects_missing_field() {
        let req = ContactRequest {
            phone: None,
            ..ContactRequest::new("Jane", "a@b.co", "", "Hello")
        };
        assert_matches!(
            req.require_fields(),
            Err(CoreError::Validation(msg)) if msg == MSG_FIELDS_REQUIRED
        );
    }

    #[test]
    fn require_fields_rejects_blank_field() {
        let req = ContactRequest::new("Jane", "a@b.co", "9876543210", "   ");
        assert_matches!(req.require_fields(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn present_fields_still_face_the_rules() {
        let fields = ContactRequest::new(" John123 ", "a@b.co", "9876543210", "Hi")
            .require_fields()
            .unwrap();
        assert_eq!(fields.name, "John123");
        assert_eq!(rejection(fields.check_rules()), MSG_INVALID_NAME);
    }

    #[test]
    fn check_rules_accepts_valid_fields() {
        let fields = ContactRequest::new("Jane Doe", "a@b.co", "9876543210", "Hi")
            .require_fields()
            .unwrap();
        assert!(fields.check_rules().is_ok());
    }

    #[test]
    fn request_decodes_null_and_missing_as_none() {
        let req: ContactRequest =
            serde_json::from_str(r#"{"name": null, "email": "a@b.co"}"#).unwrap();
        assert_eq!(req.name, None);
        assert_eq!(req.email.as_deref(), Some("a@b.co"));
        assert_eq!(req.phone, None);
    }

    #[test]
    fn response_serializes_success_flag() {
        let json = serde_json::to_value(ContactResponse::accepted(MSG_SUBMITTED)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], MSG_SUBMITTED);
    }
}
