// Contact relay: validation, persistence, best-effort notification.
// Handlers reach the datastore and the email provider only through
// the `SubmissionStore` and `Mailer` seams held in `AppState`.

pub mod handlers;
pub mod models;
pub mod relay;
pub mod store;
pub mod validation;

pub use models::{ContactRequest, ContactSubmission, Subject, SubmissionResponse};
pub use relay::{relay_submission, NotificationOutcome, NotificationRoute, RelayOutcome};
pub use store::{NewSubmission, PgSubmissionStore, SubmissionStore};
