use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{error, info, warn};

use crate::models::{ErrorResponse, GenerateLinkRequest, GenerateLinkResponse, ValidateTokenRequest, ValidateTokenResponse};
use crate::services::InviteService;
use crate::state::AppState;

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn invite_service(state: &AppState) -> Result<&InviteService, ErrorReply> {
    state.invites.as_deref().ok_or_else(|| {
        error!("Invite JWT secret not configured");
        ErrorResponse::reply(StatusCode::INTERNAL_SERVER_ERROR, "Invite links are not configured")
    })
}

/// Unwrap a JSON body, answering unreadable ones with the usual error shape.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ErrorReply> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, rejection.body_text()))
        }
    }
}

/// Mint an invite link for a session
pub async fn generate_link(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GenerateLinkRequest>, JsonRejection>,
) -> Result<Json<GenerateLinkResponse>, ErrorReply> {

    let req = json_body(payload)?;
    let session_key = match req.session_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => return Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, "Session key is required")),
    };

    let token = invite_service(&state)?.issue(&session_key).map_err(|e| {
        error!("Failed to issue invite token for {}: {}", session_key, e);
        ErrorResponse::reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    // Prefer the caller's origin so the link points back at the frontend that asked
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(state.config.invite_base_url.as_str())
        .trim_end_matches('/');
    let invite_link = format!("{}/join?token={}", origin, token);

    info!("Generated invite link for session {}", session_key);
    Ok(Json(GenerateLinkResponse {
        success: true,
        token,
        invite_link,
    }))
}

/// Check an invite token and return the session it grants
pub async fn validate_token(
    State(state): State<AppState>,
    payload: Result<Json<ValidateTokenRequest>, JsonRejection>,
) -> Result<Json<ValidateTokenResponse>, ErrorReply> {

    let req = json_body(payload)?;
    let token = match req.token.as_deref() {
        Some(token) if !token.is_empty() => token,
        _ => return Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, "Token is required")),
    };

    match invite_service(&state)?.verify(token) {
        Ok(session_key) => Ok(Json(ValidateTokenResponse {
            success: true,
            session_key,
        })),
        Err(e) => {
            warn!("Invite token rejected: {}", e);
            Err(ErrorResponse::reply(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
        }
    }
}
