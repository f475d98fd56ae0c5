pub mod health;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::contact::handlers;
use crate::state::AppState;

/// Headers browsers may send on the cross-origin POST.
const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    header::CONTENT_TYPE,
];

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS)
}

pub fn build_router(state: AppState) -> Router {
    let relay_path = state.config.relay_path.clone();

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            &relay_path,
            post(handlers::handle_submit).options(handlers::handle_preflight),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
