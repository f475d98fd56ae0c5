use anyhow::{Context, Result};
use chrono_tz::Tz;

pub const DEFAULT_RELAY_PATH: &str = "/api/send-contact-email";
pub const DEFAULT_EMAIL_FROM: &str = "Portfolio Contact <no-reply@localhost>";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_NOTIFY_TIMEZONE: Tz = chrono_tz::Pacific::Auckland;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Fixed inbox that receives every notification.
    pub contact_recipient: String,
    pub email_from: String,
    /// Absent key disables notification; submissions are still stored.
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub relay_path: String,
    /// IANA zone the notification's "Submitted" time is rendered in.
    pub notify_timezone: Tz,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let relay_path = optional("RELAY_PATH").unwrap_or_else(|| DEFAULT_RELAY_PATH.to_string());
        if !relay_path.starts_with('/') {
            anyhow::bail!("RELAY_PATH must start with '/', got '{relay_path}'");
        }

        let notify_timezone = match optional("NOTIFY_TIMEZONE") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("NOTIFY_TIMEZONE is not a known time zone: {e}"))?,
            None => DEFAULT_NOTIFY_TIMEZONE,
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            contact_recipient: require("CONTACT_RECIPIENT")?,
            email_from: optional("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            resend_api_key: optional("RESEND_API_KEY"),
            resend_api_url: optional("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            relay_path,
            notify_timezone,
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
