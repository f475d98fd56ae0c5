/// Resend client: the transactional email provider behind `Mailer`.
///
/// One attempt per message. Failures are reported to the caller, which decides
/// whether they matter; the relay treats them as best-effort.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MailError, Mailer, OutboundEmail};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ResendMailer {
    /// `base_url` is the API root, e.g. `https://api.resend.com`.
    pub fn new(api_key: String, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, MailError> {
        let body = ResendRequest {
            from: &email.from,
            to: &email.to,
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        debug!("Resend response status: {status}");

        if !status.is_success() {
            let message = serde_json::from_str::<ResendError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str::<ResendResponse>(&text)
            .ok()
            .and_then(|r| r.id))
    }
}
