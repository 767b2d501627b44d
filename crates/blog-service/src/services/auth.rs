//! Authentication service
//!
//! Handles signup, email/password signin and the Google sign-in bridge.
//! Signout is stateless and lives entirely in the HTTP layer.

use blog_core::entities::{NewUser, User};
use rand::Rng;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{GoogleAuthRequest, SigninRequest, SignupRequest, SignupResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Length of the random password given to accounts created through Google
const GENERATED_PASSWORD_LENGTH: usize = 16;

/// A freshly issued session: the token for the cookie and the account it names
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: UserResponse,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account. No session is issued.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SignupResponse> {
        request.validate()?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("User already exists"));
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::new(request.username, request.email), &password_hash)
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(SignupResponse::from(&user))
    }

    /// Check credentials and issue a session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signin(&self, request: SigninRequest) -> ServiceResult<AuthSession> {
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        if !self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?
        {
            warn!(user_id = %user.id, "Invalid password attempt");
            return Err(ServiceError::InvalidPassword);
        }

        info!(user_id = %user.id, "User signed in");

        self.grant(&user)
    }

    /// Sign in with a Google profile, creating the account on first use
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn google(&self, request: GoogleAuthRequest) -> ServiceResult<AuthSession> {
        request.validate()?;

        if let Some(user) = self.ctx.user_repo().find_by_email(&request.email).await? {
            info!(user_id = %user.id, "Google sign-in for existing account");
            return self.grant(&user);
        }

        let password_service = self.ctx.password_service();
        let password_hash =
            password_service.hash(&password_service.generate(GENERATED_PASSWORD_LENGTH))?;

        let mut new_user = NewUser::new(google_username(&request.name), request.email);
        if let Some(photo) = request.google_photo_url {
            new_user = new_user.with_profile_picture(photo);
        }

        let user = self
            .ctx
            .user_repo()
            .create(&new_user, &password_hash)
            .await?;

        info!(user_id = %user.id, username = %user.username, "Account created from Google sign-in");

        self.grant(&user)
    }

    fn grant(&self, user: &User) -> ServiceResult<AuthSession> {
        let token = self.ctx.jwt_service().issue(user.identity())?;
        Ok(AuthSession {
            token,
            user: UserResponse::from(user),
        })
    }
}

/// Lowercased display name with whitespace removed, plus four random digits
fn google_username(name: &str) -> String {
    let base: String = name
        .split_whitespace()
        .collect::<String>()
        .to_lowercase();
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{base}{suffix:04}")
}
