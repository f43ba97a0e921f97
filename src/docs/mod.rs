use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Mint an invite link for a session
#[utoipa::path(
    post,
    path = "/api/room/generate-link",
    request_body = GenerateLinkRequest,
    responses(
        (status = 200, description = "Invite link created", body = GenerateLinkResponse),
        (status = 400, description = "Session key missing", body = ErrorResponse),
        (status = 500, description = "Invite signing not configured", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn generate_link_doc() {}

/// Check an invite token
#[utoipa::path(
    post,
    path = "/api/room/validate-token",
    request_body = ValidateTokenRequest,
    responses(
        (status = 200, description = "Token is valid", body = ValidateTokenResponse),
        (status = 400, description = "Token missing", body = ErrorResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn validate_token_doc() {}

/// Connection and session counts
#[utoipa::path(
    get,
    path = "/api/v1/diagnostics",
    responses(
        (status = 200, description = "Diagnostics snapshot", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        generate_link_doc,
        validate_token_doc,
        diagnostics_doc,
    ),
    components(
        schemas(
            HealthResponse,
            GenerateLinkRequest,
            GenerateLinkResponse,
            ValidateTokenRequest,
            ValidateTokenResponse,
            DiagnosticsResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
