//! Authentication handlers
//!
//! Signup, signin, Google sign-in and signout.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use blog_service::dto::{
    GoogleAuthRequest, SigninRequest, SignupRequest, SignupResponse, UserResponse,
};
use blog_service::{AuthService, AuthSession};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Confirmation, Created};
use crate::session::{removal_cookie, session_cookie};
use crate::state::AppState;

/// Register a new account
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<SignupResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(Created(Json(response)))
}

/// Sign in with email and password
///
/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<SigninRequest>,
) -> ApiResult<(CookieJar, Json<UserResponse>)> {
    let service = AuthService::new(state.service_context());
    let session = service.signin(request).await?;
    Ok(start_session(&state, jar, session))
}

/// Sign in with a Google profile
///
/// POST /api/auth/google
pub async fn google(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<GoogleAuthRequest>,
) -> ApiResult<(CookieJar, Json<UserResponse>)> {
    let service = AuthService::new(state.service_context());
    let session = service.google(request).await?;
    Ok(start_session(&state, jar, session))
}

/// Clear the session cookie
///
/// POST /api/user/signout
pub async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Confirmation) {
    (
        jar.remove(removal_cookie(&state.config().session)),
        Confirmation("User has been signed out"),
    )
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    session: AuthSession,
) -> (CookieJar, Json<UserResponse>) {
    let cookie = session_cookie(&state.config().session, session.token);
    (jar.add(cookie), Json(session.user))
}
