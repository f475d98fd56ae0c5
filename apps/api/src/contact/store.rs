use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::contact::models::{ContactSubmission, RequestMeta};
use crate::errors::AppError;
use crate::models::submission::ContactSubmissionRow;

/// A validated submission plus provenance, ready to persist.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
}

impl NewSubmission {
    pub fn new(submission: &ContactSubmission, meta: &RequestMeta) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            message: submission.stored_message(),
            ip_address: meta.ip_address.clone(),
            user_agent: meta.user_agent.clone(),
        }
    }
}

/// Persistence seam for contact submissions.
///
/// Carried in `AppState` as `Arc<dyn SubmissionStore>`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Inserts exactly one row and returns it as stored.
    async fn insert(&self, submission: NewSubmission) -> Result<ContactSubmissionRow, AppError>;
}

/// Postgres-backed store writing to `contact_submissions`.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<ContactSubmissionRow, AppError> {
        let row: ContactSubmissionRow = sqlx::query_as(
            r#"
            INSERT INTO contact_submissions
                (id, name, email, phone, message, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, phone, message, ip_address, user_agent, created_at
            "#,
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.message)
        .bind(&submission.ip_address)
        .bind(&submission.user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
