//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Required text fields default to empty so a missing field and an empty one
//! produce the same message.

use blog_common::validate_password_length;
use blog_core::{validate_username, Id};
use serde::Deserialize;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Email/password sign-in request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub password: String,
}

/// Profile asserted by the Google sign-in popup
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    pub name: String,

    pub google_photo_url: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial account update; empty strings count as absent
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "username_rules"))]
    pub username: Option<String>,

    pub email: Option<String>,

    #[validate(custom(function = "password_rules"))]
    pub password: Option<String>,

    pub profile_picture: Option<String>,
}

fn username_rules(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Ok(());
    }
    validate_username(username)
        .map_err(|e| ValidationError::new("username").with_message(e.to_string().into()))
}

fn password_rules(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Ok(());
    }
    validate_password_length(password)
        .map_err(|e| ValidationError::new("password").with_message(e.to_string().into()))
}

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide all required fields"))]
    pub content: String,

    pub category: Option<String>,

    pub image: Option<String>,
}

/// Update post request; only the fields present are replaced
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub content: String,

    pub post_id: Id,

    /// Must be the caller
    pub user_id: Id,
}

/// Edit comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub content: String,
}
