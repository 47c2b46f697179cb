//! DTOs for liveness endpoints.

use serde::Serialize;

/// Liveness response. Dependencies are not probed.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}
