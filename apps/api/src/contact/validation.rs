use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::contact::models::{ContactRequest, ContactSubmission, Subject};

pub const MIN_MESSAGE_LEN: usize = 10;

/// local-part "@" domain "." tld, no whitespace and no second "@".
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: name, email, and message are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Message must be at least 10 characters")]
    MessageTooShort,

    #[error("Unknown subject: {0}")]
    UnknownSubject(String),
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validates a raw payload into a `ContactSubmission`.
///
/// Checks run in a fixed order: required fields, address shape, message length, subject.
/// Whitespace-only values count as missing. Name, email and phone are trimmed;
/// the message is kept exactly as submitted.
pub fn validate_submission(request: &ContactRequest) -> Result<ContactSubmission, ValidationError> {
    let name = non_empty(&request.name);
    let email = non_empty(&request.email);
    let message = non_empty(&request.message);

    let (Some(name), Some(email), Some(message), Some(raw_message)) =
        (name, email, message, request.message.as_deref())
    else {
        return Err(ValidationError::MissingFields);
    };

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if message.chars().count() < MIN_MESSAGE_LEN {
        return Err(ValidationError::MessageTooShort);
    }

    let subject = match non_empty(&request.subject) {
        Some(raw) => Some(
            raw.parse::<Subject>()
                .map_err(|_| ValidationError::UnknownSubject(raw.to_string()))?,
        ),
        None => None,
    };

    Ok(ContactSubmission {
        name: name.to_string(),
        email: email.to_string(),
        phone: non_empty(&request.phone).map(str::to_string),
        subject,
        message: raw_message.to_string(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
