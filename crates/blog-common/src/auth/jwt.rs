//! Session tokens
//!
//! A session is an HS256 JWT carrying the user id and admin flag. Tokens have
//! no expiry unless one is configured, in which case `exp` is set and checked.

use blog_core::{Id, Identity};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: Id,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp), only with a configured session expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Identity asserted by these claims
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.is_admin)
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry: Option<i64>,
}

impl JwtService {
    /// Create a new JWT service; `session_expiry` is in seconds
    #[must_use]
    pub fn new(secret: &str, session_expiry: Option<i64>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiry,
        }
    }

    /// Issue a session token for the given identity
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, identity: Identity) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: identity.user_id,
            is_admin: identity.is_admin,
            iat: now.timestamp(),
            exp: self
                .session_expiry
                .map(|secs| (now + Duration::seconds(secs)).timestamp()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns an error if the token is forged, malformed or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional; when present it is still enforced
        validation.required_spec_claims.clear();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Verify a token and return the caller's identity
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        self.decode_token(token).map(|claims| claims.identity())
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_expiry", &self.session_expiry)
            .finish_non_exhaustive()
    }
}
