//! Outbound notification email.
//!
//! Handlers never talk to a provider directly; they go through `Mailer`,
//! which `AppState` carries as `Option<Arc<dyn Mailer>>`.

use async_trait::async_trait;
use thiserror::Error;

pub mod resend;
pub mod template;

pub use resend::ResendMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A fully rendered message ready for the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message. Returns the provider's message id when it reports one.
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, MailError>;
}
