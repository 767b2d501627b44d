//! Session cookie
//!
//! The session token travels in an HTTP-only cookie. It never carries a
//! `Max-Age`; a configured session expiry lives in the token itself.

use axum_extra::extract::cookie::{Cookie, SameSite};
use blog_common::SessionConfig;

/// Cookie carrying a freshly issued session token
pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .build()
}

/// Cookie matching the session cookie's name and path, for removal
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .build()
}
