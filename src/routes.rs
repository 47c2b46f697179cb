//! Top-level routers of the write and read services.
//!
//! # Convert service
//!
//! - `POST /api/v1/urls`            - Create a short code
//! - `GET  /api/health`             - Liveness
//! - `GET  /api/ping`               - Liveness
//!
//! # Redirect service
//!
//! - `GET  /{short_code}`           - 302 to the original URL
//! - `GET  /`                       - 400 (empty short code)
//! - `GET  /api/v1/urls/{short_code}` - Full record
//! - `GET  /api/health`             - Liveness
//! - `GET  /api/ping`               - Liveness
//!
//! Both routers carry request tracing. [`with_normalized_path`] adds trailing
//! slash trimming for serving.

use crate::api;
use crate::api::handlers::{missing_code_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::{ConvertState, RedirectState};
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router of the write-side service.
pub fn convert_router(state: ConvertState) -> Router {
    let api_router = api::routes::convert_routes().merge(api::routes::liveness_routes());

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Router of the read-side service.
pub fn redirect_router(state: RedirectState) -> Router {
    let api_router = api::routes::redirect_routes().merge(api::routes::liveness_routes());

    Router::new()
        .route("/", get(missing_code_handler))
        .route("/{short_code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Trims trailing slashes before routing.
pub fn with_normalized_path(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
