//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health status response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Overall status.
    pub status: String,
}

/// Health check handler. Never touches the store.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
