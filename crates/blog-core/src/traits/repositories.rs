//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Comment, NewComment, NewPost, NewUser, Post, PostChanges, User, UserChanges,
};
use crate::error::DomainError;
use crate::value_objects::{Id, ListWindow};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find every user whose id is in `ids` (missing ids are skipped)
    async fn find_many(&self, ids: &[Id]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user; fails with `EmailAlreadyExists` on duplicate email
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Apply a partial update and return the stored row
    async fn update(&self, id: Id, changes: &UserChanges) -> RepoResult<User>;

    /// Delete a user together with their posts and comments
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>>;

    /// Page of users ordered by creation time
    async fn list(&self, window: &ListWindow) -> RepoResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;

    /// Users created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Filters for post listings; all set filters must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: Option<Id>,
    pub category: Option<String>,
    pub slug: Option<String>,
    pub post_id: Option<Id>,
    /// Case-insensitive substring of the title or the content
    pub search_term: Option<String>,
}

impl PostFilter {
    /// Check a post against the filter in memory
    pub fn matches(&self, post: &Post) -> bool {
        if self.author_id.is_some_and(|id| id != post.author_id) {
            return false;
        }
        if self.post_id.is_some_and(|id| id != post.id) {
            return false;
        }
        if self.category.as_ref().is_some_and(|c| *c != post.category) {
            return false;
        }
        if self.slug.as_ref().is_some_and(|s| *s != post.slug) {
            return false;
        }
        if let Some(term) = &self.search_term {
            let term = term.to_lowercase();
            return post.title.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term);
        }
        true
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>>;

    /// Create a new post
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Apply a partial update and return the stored row
    async fn update(&self, id: Id, changes: &PostChanges) -> RepoResult<Post>;

    /// Delete a post together with its comments
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Filtered page of posts ordered by last update
    async fn find(&self, filter: &PostFilter, window: &ListWindow) -> RepoResult<Vec<Post>>;

    /// Total number of posts, ignoring filters
    async fn count(&self) -> RepoResult<i64>;

    /// Posts created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>>;

    /// Create a new comment with no likes
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// All comments on a post, newest first
    async fn find_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>>;

    /// Atomically add or remove `user_id` from the comment's likes.
    ///
    /// Concurrent toggles by different users must all be applied.
    async fn toggle_like(&self, id: Id, user_id: Id) -> RepoResult<Comment>;

    /// Replace the comment text
    async fn update_text(&self, id: Id, text: &str) -> RepoResult<Comment>;

    /// Delete a comment
    async fn delete(&self, id: Id) -> RepoResult<()>;

    /// Page of all comments ordered by creation time
    async fn list(&self, window: &ListWindow) -> RepoResult<Vec<Comment>>;

    /// Total number of comments
    async fn count(&self) -> RepoResult<i64>;

    /// Comments created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;
}
