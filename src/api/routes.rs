//! API route configuration.

use crate::api::handlers::{
    create_url_handler, get_url_handler, health_handler, missing_code_handler, ping_handler,
};
use crate::state::{ConvertState, RedirectState};
use axum::{
    Router,
    routing::{get, post},
};

/// Write-side API routes.
///
/// # Endpoints
///
/// - `POST /v1/urls` - Create a short code
pub fn convert_routes() -> Router<ConvertState> {
    Router::new().route("/v1/urls", post(create_url_handler))
}

/// Read-side API routes.
///
/// # Endpoints
///
/// - `GET /v1/urls/{short_code}` - Full record for a short code
/// - `GET /v1/urls` - Rejected with 400 (empty short code)
pub fn redirect_routes() -> Router<RedirectState> {
    Router::new()
        .route("/v1/urls", get(missing_code_handler))
        .route("/v1/urls/{short_code}", get(get_url_handler))
}

/// Liveness routes shared by both services.
///
/// # Endpoints
///
/// - `GET /health`
/// - `GET /ping`
pub fn liveness_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/ping", get(ping_handler))
}
