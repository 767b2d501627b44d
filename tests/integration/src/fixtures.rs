//! Test fixtures and data generators
//!
//! Provides reusable request bodies and typed views of API responses.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Mixed with the clock so reruns against the same database do not collide.
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", Utc::now().timestamp_millis() % 100_000_000)
}

/// Signup request
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Signin request
#[derive(Debug, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Google sign-in request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest {
    pub email: String,
    pub name: String,
    pub google_photo_url: Option<String>,
}

impl GoogleRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("google{suffix}@example.com"),
            name: "Test Person".to_string(),
            google_photo_url: Some("https://example.com/photo.png".to_string()),
        }
    }
}

/// Signup response
#[derive(Debug, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: NewAccount,
}

#[derive(Debug, Deserialize)]
pub struct NewAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// User response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub profile_picture: String,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Paged users
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub users: Vec<UserResponse>,
    pub total_users: i64,
    pub last_month_users: i64,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Post {suffix}"),
            content: "Some test content".to_string(),
            category: Some("testing".to_string()),
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
}

/// Paged posts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<PostResponse>,
    pub total_posts: i64,
    pub last_month_posts: i64,
}

/// Create comment request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
}

/// Comment response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub user_id: i64,
    pub likes: Vec<i64>,
    pub number_of_likes: i64,
    pub user: Option<UserResponse>,
}

/// Uniform error body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}
