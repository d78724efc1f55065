//! Health check endpoint.

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "AgroDetect API v2 (Demo)";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health: static liveness payload.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        service: SERVICE_NAME,
    })
}
