//! Handlers for liveness endpoints.

use axum::Json;

use crate::api::dto::health::{HealthResponse, PingResponse};

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// Liveness only: the counter, store, and cache are not probed, so a replica
/// with a broken dependency still answers 200.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/ping`
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}
