use anyhow::{Context, Result};
use askama::Template;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::contact::models::ContactSubmission;

/// Notification email HTML template. Askama escapes every interpolated value.
#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    subject: Option<&'a str>,
    message: &'a str,
    submission_id: Uuid,
    submitted: String,
}

#[derive(Template)]
#[template(source = "New Contact Form Submission from {{ name }}", ext = "html")]
struct ContactNotificationSubject<'a> {
    name: &'a str,
}

pub fn notification_subject(submission: &ContactSubmission) -> Result<String> {
    ContactNotificationSubject {
        name: &submission.name,
    }
    .render()
    .context("Failed to render email subject template")
}

/// Renders the notification body with the submission time shown in `timezone`.
pub fn render_notification(
    submission: &ContactSubmission,
    submission_id: Uuid,
    submitted_at: DateTime<Utc>,
    timezone: Tz,
) -> Result<String> {
    let template = ContactNotificationHtml {
        name: &submission.name,
        email: &submission.email,
        phone: submission.phone.as_deref().unwrap_or("Not provided"),
        subject: submission.subject.as_ref().map(|subject| subject.as_ref()),
        message: &submission.message,
        submission_id,
        submitted: format_submitted(submitted_at, timezone),
    };

    template
        .render()
        .context("Failed to render HTML email template")
}

/// `4/03/2025, 10:05:00 pm` style, in the given zone.
pub fn format_submitted(submitted_at: DateTime<Utc>, timezone: Tz) -> String {
    submitted_at
        .with_timezone(&timezone)
        .format("%-d/%m/%Y, %-I:%M:%S %P")
        .to_string()
}
