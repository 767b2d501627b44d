//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound(Id),

    #[error("Post not found")]
    PostNotFound(Id),

    #[error("Comment not found")]
    CommentNotFound(Id),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidUsername(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User already exists")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidUsername(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UserNotFound(Id::new(1)).code(), "UNKNOWN_USER");
        assert_eq!(DomainError::EmailAlreadyExists.code(), "EMAIL_ALREADY_EXISTS");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::CommentNotFound(Id::new(1)).is_not_found());
        assert!(!DomainError::EmailAlreadyExists.is_not_found());
        assert!(DomainError::InvalidUsername("x".to_string()).is_validation());
        assert!(DomainError::EmailAlreadyExists.is_conflict());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::PostNotFound(Id::new(9)).to_string(), "Post not found");
        assert_eq!(
            DomainError::EmailAlreadyExists.to_string(),
            "User already exists"
        );
    }
}
