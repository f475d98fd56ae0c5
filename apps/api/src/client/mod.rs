//! Contact form client.
//!
//! `ContactForm` owns the field values and the submit status for one form.
//! `RelayClient` performs the single POST to the relay. There is no automatic
//! retry; a failed submission stays in `Error` until the user submits again.

use reqwest::Client;
use thiserror::Error;

use crate::contact::models::{ContactRequest, ErrorResponse, Subject, SubmissionResponse};
use crate::contact::validation::{is_valid_email, ValidationError, MIN_MESSAGE_LEN};

pub const FALLBACK_ERROR: &str = "Failed to send message";
pub const TRANSPORT_ERROR: &str = "Transmission failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay answered with a non-2xx status.
    #[error("relay rejected submission (status {status})")]
    Rejected { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Text shown in the form's error banner.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Rejected { message: None, .. } => FALLBACK_ERROR.to_string(),
            ClientError::Transport(_) => TRANSPORT_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("a submission is already in flight")]
    InFlight,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: Subject,
    pub message: String,
    status: FormStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            subject: Subject::default(),
            message: String::new(),
            status: FormStatus::Idle,
        }
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_LEN {
            return Err(ValidationError::MessageTooShort);
        }
        Ok(())
    }

    /// Validates and enters `Submitting`, yielding the payload to POST.
    ///
    /// A validation failure moves the form to `Error` with the failure text.
    pub fn begin_submit(&mut self) -> Result<ContactRequest, FormError> {
        if !self.can_submit() {
            return Err(FormError::InFlight);
        }
        if let Err(e) = self.validate() {
            self.status = FormStatus::Error(e.to_string());
            return Err(e.into());
        }

        self.status = FormStatus::Submitting;
        let phone = self.phone.trim();
        Ok(ContactRequest {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            subject: Some(self.subject.to_string()),
            message: Some(self.message.clone()),
        })
    }

    /// Applies the relay's answer to an in-flight submission.
    ///
    /// Ignored unless the form is `Submitting`; a late answer never overwrites newer state.
    pub fn complete(&mut self, result: Result<SubmissionResponse, ClientError>) {
        if self.status != FormStatus::Submitting {
            return;
        }
        match result {
            Ok(_) => {
                let status = FormStatus::Success;
                *self = Self {
                    status,
                    ..Self::default()
                };
            }
            Err(e) => self.status = FormStatus::Error(e.user_message()),
        }
    }

    /// Back to the input state after a confirmation or error banner.
    pub fn reset(&mut self) {
        if self.status != FormStatus::Submitting {
            self.status = FormStatus::Idle;
        }
    }
}

/// HTTP client for the relay endpoint.
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    endpoint: String,
}

impl RelayClient {
    /// `endpoint` is the full relay URL, e.g. `https://example.com/api/send-contact-email`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Issues one POST. Non-2xx answers become `ClientError::Rejected` carrying the
    /// relay's `error` text when the body has one.
    pub async fn submit(&self, request: &ContactRequest) -> Result<SubmissionResponse, ClientError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error)
                .filter(|m| !m.is_empty());
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<SubmissionResponse>().await?)
    }

    /// Drives one full submit cycle on `form`: begin, POST, complete.
    ///
    /// The form is borrowed mutably for the whole request, so a second submit from
    /// the same form cannot start until this one has settled.
    pub async fn submit_form(&self, form: &mut ContactForm) -> Result<(), FormError> {
        let request = form.begin_submit()?;
        let result = self.submit(&request).await;
        form.complete(result);
        Ok(())
    }
}
