use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

const INVITE_TOKEN_TYPE: &str = "room-invite";

/// Claims carried by an invite token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteClaims {
    pub session_key: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum InviteError {
    #[error("Session key is required")]
    MissingSessionKey,

    #[error("Token is not a room invite")]
    WrongTokenType,

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Signs and verifies session invite tokens. Holds no per-token state.
#[derive(Clone)]
pub struct InviteService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl InviteService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Build the service if a signing secret is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        match config.invite_jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Some(Self::new(secret, config.invite_ttl_hours)),
            _ => {
                warn!("No invite JWT secret configured - invite links are disabled");
                None
            }
        }
    }

    /// Mint a token for a session key
    pub fn issue(&self, session_key: &str) -> Result<String, InviteError> {
        self.issue_at(session_key, Utc::now())
    }

    fn issue_at(&self, session_key: &str, now: DateTime<Utc>) -> Result<String, InviteError> {
        if session_key.trim().is_empty() {
            return Err(InviteError::MissingSessionKey);
        }
        let claims = InviteClaims {
            session_key: session_key.to_string(),
            token_type: INVITE_TOKEN_TYPE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        info!("Issued invite token for session {}", session_key);
        Ok(token)
    }

    /// Check signature, expiry and token type, and return the session key
    pub fn verify(&self, token: &str) -> Result<String, InviteError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<InviteClaims>(token, &self.decoding_key, &validation)?;
        if token_data.claims.token_type != INVITE_TOKEN_TYPE {
            return Err(InviteError::WrongTokenType);
        }
        Ok(token_data.claims.session_key)
    }
}
