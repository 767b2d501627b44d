//! User entity - a blog account

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{Id, Identity};

/// Placeholder avatar used when an account has no picture of its own
pub const DEFAULT_PROFILE_PICTURE: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_1280.png";

/// User account.
///
/// The password hash is deliberately not part of the entity; repositories
/// hand it out only through `get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity a session for this account asserts
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.is_admin)
    }
}

/// Data required to create an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            profile_picture: None,
        }
    }

    pub fn with_profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }

    /// Picture to store, substituting the placeholder when none was given
    pub fn profile_picture_or_default(&self) -> &str {
        self.profile_picture
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_PROFILE_PICTURE)
    }
}

/// Partial update of an account; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.profile_picture.is_none()
            && self.password_hash.is_none()
    }
}

/// Check a requested username: 7-20 characters, no spaces, lowercase and
/// alphanumeric only. Rules are checked in that order and the first failure
/// is reported.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let len = username.chars().count();
    if !(7..=20).contains(&len) {
        return Err(DomainError::InvalidUsername(
            "Username must be between 7 and 20 characters".to_string(),
        ));
    }
    if username.contains(' ') {
        return Err(DomainError::InvalidUsername(
            "Username cannot contain spaces".to_string(),
        ));
    }
    if username != username.to_lowercase() {
        return Err(DomainError::InvalidUsername(
            "Username must be lowercase".to_string(),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidUsername(
            "Username can only contain letters and numbers".to_string(),
        ));
    }
    Ok(())
}
