use std::sync::Arc;

use crate::config::Config;
use crate::contact::store::SubmissionStore;
use crate::email::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable datastore. Production: `PgSubmissionStore`.
    pub store: Arc<dyn SubmissionStore>,
    /// `None` when no provider key is configured; notification is then skipped.
    pub mailer: Option<Arc<dyn Mailer>>,
    pub config: Config,
}
