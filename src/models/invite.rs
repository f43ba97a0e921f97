use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to mint an invite link for a session
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLinkRequest {
    pub session_key: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLinkResponse {
    pub success: bool,
    pub token: String,
    pub invite_link: String,
}

/// Request to check an invite token
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ValidateTokenRequest {
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub success: bool,
    pub session_key: String,
}
