use crate::{handlers::{diagnostics, generate_link, health_check, ready_check, validate_token}, state::AppState};
use axum::{routing::{get, post}, Router};

/// Create API routes
pub fn create_api_routes() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/room/generate-link", post(generate_link))
        .route("/room/validate-token", post(validate_token))
        .route("/v1/diagnostics", get(diagnostics))
}
