use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use uuid::Uuid;

/// Wire payload posted by the contact form.
///
/// Every field is optional on the wire so that a missing field surfaces as a
/// validation error rather than a body-parse rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The fixed set of enquiry subjects offered by the form.
#[derive(
    EnumString, Display, AsRefStr, VariantArray, Default, Clone, Copy, Debug, PartialEq, Eq,
)]
pub enum Subject {
    #[default]
    #[strum(serialize = "Job Opportunity")]
    JobOpportunity,
    #[strum(serialize = "Networking Inquiry")]
    NetworkingInquiry,
    #[strum(serialize = "Reference Request")]
    ReferenceRequest,
    #[strum(serialize = "General Enquiry")]
    GeneralEnquiry,
}

/// A submission that passed validation. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<Subject>,
    pub message: String,
}

impl ContactSubmission {
    /// The message as persisted: prefixed with a subject line when one was chosen.
    pub fn stored_message(&self) -> String {
        match self.subject {
            Some(subject) => format!("Subject: {subject}\n\n{}", self.message),
            None => self.message.clone(),
        }
    }
}

/// Request provenance recorded alongside each submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMeta {
    pub ip_address: String,
    pub user_agent: String,
}

impl Default for RequestMeta {
    fn default() -> Self {
        Self {
            ip_address: UNKNOWN.to_string(),
            user_agent: UNKNOWN.to_string(),
        }
    }
}

pub const UNKNOWN: &str = "unknown";

/// Body of a 200 response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: Uuid,
    pub email_sent: bool,
}

/// Body of a 4xx/5xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
