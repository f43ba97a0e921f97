use axum::Json;
use chrono::Utc;
use crate::models::HealthResponse;
use tracing::debug;

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        success: true,
        message: "Co Lab relay is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check endpoint
pub async fn ready_check() -> Json<HealthResponse> {
    debug!("Readiness check requested");
    // Nothing external to wait for: the relay holds all of its state in memory.
    Json(HealthResponse {
        success: true,
        message: "Service is ready".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
