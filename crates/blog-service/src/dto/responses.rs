//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase
//! field names. No response type carries a password hash.

use blog_core::Id;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// `{ "message": ... }` body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity fields echoed back after signup
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub id: Id,
    pub username: String,
    pub email: String,
}

/// Signup result
#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: NewAccount,
}

impl SignupResponse {
    pub const WELCOME: &'static str = "Welcome aboard! Your account is ready.";
}

/// Admin listing of users
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub users: Vec<UserResponse>,
    pub total_users: i64,
    pub last_month_users: i64,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Id,
    /// Author
    pub user_id: Id,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filtered listing of posts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<PostResponse>,
    pub total_posts: i64,
    pub last_month_posts: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Id,
    pub post_id: Id,
    pub user_id: Id,
    pub text: String,
    pub likes: Vec<Id>,
    pub number_of_likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Author, included in per-post listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Admin listing of comments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsPage {
    pub comments: Vec<CommentResponse>,
    pub total_comments: i64,
    pub last_month_comments: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserResponse {
        let now = Utc::now();
        UserResponse {
            id: Id::new(1),
            username: "alice123".to_string(),
            email: "a@x.com".to_string(),
            profile_picture: "http://p/a.png".to_string(),
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_user_response_field_names() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["profilePicture"], "http://p/a.png");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_comment_user_is_optional() {
        let now = Utc::now();
        let mut comment = CommentResponse {
            id: Id::new(2),
            post_id: Id::new(3),
            user_id: Id::new(1),
            text: "nice".to_string(),
            likes: vec![Id::new(1)],
            number_of_likes: 1,
            created_at: now,
            updated_at: now,
            user: None,
        };

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["numberOfLikes"], 1);
        assert_eq!(json["postId"], 3);
        assert!(json.get("user").is_none());

        comment.user = Some(user());
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["user"]["username"], "alice123");
    }

    #[test]
    fn test_page_counters() {
        let page = UsersPage {
            users: vec![],
            total_users: 4,
            last_month_users: 2,
        };
        let json = serde_json::to_value(page).unwrap();
        assert_eq!(json["totalUsers"], 4);
        assert_eq!(json["lastMonthUsers"], 2);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(true).is_ready());

        let not_ready = ReadinessResponse::ready(false);
        assert!(!not_ready.is_ready());
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
