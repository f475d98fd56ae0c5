use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{info, warn};

use crate::contact::models::{ContactRequest, RequestMeta, SubmissionResponse, UNKNOWN};
use crate::contact::relay::{relay_submission, NotificationRoute};
use crate::contact::validation::validate_submission;
use crate::errors::AppError;
use crate::state::AppState;

pub const SUCCESS_MESSAGE: &str = "Submission received successfully";

/// POST <relay path>
pub async fn handle_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected contact payload: {rejection}");
        AppError::Validation("Invalid request body".to_string())
    })?;

    let submission = validate_submission(&request).map_err(|e| {
        info!("Contact submission failed validation: {e}");
        AppError::from(e)
    })?;

    let meta = request_meta(&headers);
    let route = NotificationRoute {
        from: state.config.email_from.clone(),
        recipient: state.config.contact_recipient.clone(),
        timezone: state.config.notify_timezone,
    };

    let outcome = relay_submission(
        state.store.as_ref(),
        state.mailer.as_deref(),
        &route,
        &submission,
        &meta,
    )
    .await?;

    Ok(Json(SubmissionResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        submission_id: outcome.record.id,
        email_sent: outcome.notification.email_sent(),
    }))
}

/// OPTIONS <relay path>
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

/// Source IP is the first `x-forwarded-for` hop; both fields fall back to `"unknown"`.
pub fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip_address = header_value(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();
    let user_agent = header_value(headers, "user-agent")
        .unwrap_or(UNKNOWN)
        .to_string();

    RequestMeta {
        ip_address,
        user_agent,
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_meta_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("user-agent", HeaderValue::from_static("Mozilla/5.0"));

        let meta = request_meta(&headers);
        assert_eq!(meta.ip_address, "203.0.113.7");
        assert_eq!(meta.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_request_meta_falls_back_to_unknown() {
        let meta = request_meta(&HeaderMap::new());
        assert_eq!(meta, RequestMeta::default());
        assert_eq!(meta.ip_address, "unknown");
        assert_eq!(meta.user_agent, "unknown");
    }
}
