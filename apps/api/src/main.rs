use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use portfolio_relay::config::Config;
use portfolio_relay::contact::PgSubmissionStore;
use portfolio_relay::db::create_pool;
use portfolio_relay::email::{Mailer, ResendMailer};
use portfolio_relay::routes::build_router;
use portfolio_relay::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio relay v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgSubmissionStore::new(db));

    // Initialize email provider (optional)
    let mailer: Option<Arc<dyn Mailer>> = match &config.resend_api_key {
        Some(key) => {
            let mailer = ResendMailer::new(key.clone(), &config.resend_api_url)?;
            info!("Resend mailer initialized (recipient: {})", config.contact_recipient);
            Some(Arc::new(mailer) as Arc<dyn Mailer>)
        }
        None => {
            warn!("RESEND_API_KEY not set; submissions will be stored without email notification");
            None
        }
    };

    let state = AppState {
        store,
        mailer,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}, relay path {}", config.relay_path);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
