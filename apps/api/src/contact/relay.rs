//! Submission pipeline: `validated → persisted → email-attempted`.
//!
//! Persistence is the required phase and short-circuits on failure.
//! Notification is best-effort: its outcome is recorded, never propagated.

use chrono_tz::Tz;
use tracing::{error, info, warn};

use crate::contact::models::{ContactSubmission, RequestMeta};
use crate::contact::store::{NewSubmission, SubmissionStore};
use crate::email::template::{notification_subject, render_notification};
use crate::email::{Mailer, OutboundEmail};
use crate::errors::AppError;
use crate::models::submission::ContactSubmissionRow;

/// Where notifications go, who they claim to come from, and the zone their
/// timestamps are shown in.
#[derive(Debug, Clone)]
pub struct NotificationRoute {
    pub from: String,
    pub recipient: String,
    pub timezone: Tz,
}

/// Result of the best-effort phase.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    Sent { provider_id: Option<String> },
    /// No mailer configured.
    Skipped,
    Failed { reason: String },
}

impl NotificationOutcome {
    pub fn email_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }
}

/// Aggregate of both phases for one accepted submission.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    pub record: ContactSubmissionRow,
    pub notification: NotificationOutcome,
}

/// Persists the submission, then attempts the notification.
///
/// Returns `Err` only when the insert fails; in that case no email is attempted.
pub async fn relay_submission(
    store: &dyn SubmissionStore,
    mailer: Option<&dyn Mailer>,
    route: &NotificationRoute,
    submission: &ContactSubmission,
    meta: &RequestMeta,
) -> Result<RelayOutcome, AppError> {
    let record = store.insert(NewSubmission::new(submission, meta)).await?;
    info!(submission_id = %record.id, "Database insert OK");

    let notification = notify(mailer, route, submission, &record).await;

    Ok(RelayOutcome {
        record,
        notification,
    })
}

async fn notify(
    mailer: Option<&dyn Mailer>,
    route: &NotificationRoute,
    submission: &ContactSubmission,
    record: &ContactSubmissionRow,
) -> NotificationOutcome {
    let Some(mailer) = mailer else {
        warn!(
            submission_id = %record.id,
            "RESEND_API_KEY not configured - email notification skipped"
        );
        return NotificationOutcome::Skipped;
    };

    let rendered = notification_subject(submission).and_then(|subject| {
        render_notification(submission, record.id, record.created_at, route.timezone)
            .map(|html| (subject, html))
    });
    let (subject, html) = match rendered {
        Ok(parts) => parts,
        Err(e) => {
            error!(submission_id = %record.id, "Failed to render notification email: {e:#}");
            return NotificationOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    let email = OutboundEmail {
        from: route.from.clone(),
        to: vec![route.recipient.clone()],
        reply_to: submission.email.clone(),
        subject,
        html,
    };

    match mailer.send(&email).await {
        Ok(provider_id) => {
            info!(
                submission_id = %record.id,
                provider_id = provider_id.as_deref().unwrap_or("-"),
                "Notification email sent"
            );
            NotificationOutcome::Sent { provider_id }
        }
        Err(e) => {
            error!(
                submission_id = %record.id,
                "Email notification failed, but submission was saved to database: {e}"
            );
            NotificationOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::models::Subject;
    use crate::email::MailError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        fail: bool,
        rows: Mutex<Vec<ContactSubmissionRow>>,
    }

    #[async_trait]
    impl SubmissionStore for FakeStore {
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

    #[derive(Default)]
    struct FakeMailer {
        fail: bool,
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(&self, email: &OutboundEmail) -> Result<Option<String>, MailError> {
            self.sent.lock().unwrap().push(email.clone());
            if self.fail {
                return Err(MailError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(Some("msg_1".to_string()))
        }
    }

    fn route() -> NotificationRoute {
        NotificationRoute {
            from: "Portfolio <no-reply@example.com>".to_string(),
            recipient: "owner@example.com".to_string(),
            timezone: chrono_tz::Pacific::Auckland,
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: Some("021 555 0100".to_string()),
            subject: Some(Subject::JobOpportunity),
            message: "Hello there, checking availability.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_persists_then_notifies() {
        let store = FakeStore::default();
        let mailer = FakeMailer::default();
        let meta = RequestMeta {
            ip_address: "203.0.113.7".to_string(),
            user_agent: "curl/8.0".to_string(),
        };

        let mailer_ref: &dyn Mailer = &mailer;
        let outcome = relay_submission(&store, Some(mailer_ref), &route(), &submission(), &meta)
            .await
            .unwrap();

        assert!(outcome.notification.email_sent());
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, outcome.record.id);
        assert_eq!(rows[0].ip_address, "203.0.113.7");
        assert!(rows[0].message.starts_with("Subject: Job Opportunity\n\n"));

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["owner@example.com".to_string()]);
        assert_eq!(sent[0].reply_to, "jane@example.com");
        assert!(sent[0].html.contains(&outcome.record.id.to_string()));
    }

    #[tokio::test]
    async fn test_missing_mailer_skips_but_succeeds() {
        let store = FakeStore::default();
        let meta = RequestMeta::default();
        let outcome = relay_submission(&store, None, &route(), &submission(), &meta)
            .await
            .unwrap();

        assert_eq!(outcome.notification, NotificationOutcome::Skipped);
        assert!(!outcome.notification.email_sent());
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mailer_failure_does_not_fail_request() {
        let store = FakeStore::default();
        let mailer = FakeMailer {
            fail: true,
            ..Default::default()
        };

        let mailer_ref: &dyn Mailer = &mailer;
        let meta = RequestMeta::default();
        let outcome = relay_submission(&store, Some(mailer_ref), &route(), &submission(), &meta)
            .await
            .unwrap();

        assert!(matches!(outcome.notification, NotificationOutcome::Failed { .. }));
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_short_circuits_before_email() {
        let store = FakeStore {
            fail: true,
            ..Default::default()
        };
        let mailer = FakeMailer::default();

        let mailer_ref: &dyn Mailer = &mailer;
        let meta = RequestMeta::default();
        let result =
            relay_submission(&store, Some(mailer_ref), &route(), &submission(), &meta).await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
