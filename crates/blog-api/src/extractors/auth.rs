//! Authentication extractor
//!
//! Reads the session token from the `access_token` cookie and verifies it.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use blog_common::AppError;
use blog_core::Identity;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller proven by a valid session cookie
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub identity: Identity,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(&app_state.config().session.cookie_name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(AppError::MissingAuth)?;

        let identity = app_state.jwt_service().verify(&token).map_err(|e| {
            tracing::warn!(error_code = e.error_code(), "Rejected session token");
            e
        })?;

        Ok(Self { identity })
    }
}
