#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use portfolio_relay::config::Config;
use portfolio_relay::contact::{NewSubmission, SubmissionStore};
use portfolio_relay::email::{MailError, Mailer, OutboundEmail};
use portfolio_relay::errors::AppError;
use portfolio_relay::models::submission::ContactSubmissionRow;
use portfolio_relay::state::AppState;

pub const RELAY_PATH: &str = "/api/send-contact-email";
pub const RECIPIENT: &str = "owner@example.com";

/// In-memory `SubmissionStore`; `failing()` simulates an unavailable datastore.
#[derive(Default)]
pub struct MemoryStore {
    fail: bool,
    rows: Mutex<Vec<ContactSubmissionRow>>,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<ContactSubmissionRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, s: NewSubmission) -> Result<ContactSubmissionRow, AppError> {
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let row = ContactSubmissionRow {
            id: s.id,
            name: s.name,
            email: s.email,
            phone: s.phone,
            message: s.message,
            ip_address: s.ip_address,
            user_agent: s.user_agent,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }
}

/// `Mailer` that records every message; `failing()` answers like a provider outage.
#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, MailError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            return Err(MailError::Api {
                status: 500,
                message: "provider down".to_string(),
            });
        }
        Ok(Some(format!("msg_{}", self.sent.lock().unwrap().len())))
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/unused".to_string()),
        "CONTACT_RECIPIENT" => Some(RECIPIENT.to_string()),
        "EMAIL_FROM" => Some("Portfolio <no-reply@example.com>".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn test_state(store: Arc<MemoryStore>, mailer: Option<Arc<RecordingMailer>>) -> AppState {
    AppState {
        store,
        mailer: mailer.map(|m| m as Arc<dyn Mailer>),
        config: test_config(),
    }
}
