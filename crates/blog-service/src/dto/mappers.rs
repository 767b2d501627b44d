//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use blog_core::entities::{Comment, Post, User};
use blog_core::ListPage;

use super::responses::{
    CommentResponse, CommentsPage, NewAccount, PostResponse, PostsPage, SignupResponse,
    UserResponse, UsersPage,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            profile_picture: user.profile_picture.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for SignupResponse {
    fn from(user: &User) -> Self {
        Self {
            message: Self::WELCOME.to_string(),
            user: NewAccount {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
            },
        }
    }
}

impl From<ListPage<User>> for UsersPage {
    fn from(page: ListPage<User>) -> Self {
        Self {
            users: page.items.iter().map(UserResponse::from).collect(),
            total_users: page.total,
            last_month_users: page.last_month,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            user_id: post.author_id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            image: post.image.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self::from(&post)
    }
}

impl From<ListPage<Post>> for PostsPage {
    fn from(page: ListPage<Post>) -> Self {
        Self {
            posts: page.items.iter().map(PostResponse::from).collect(),
            total_posts: page.total,
            last_month_posts: page.last_month,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            text: comment.text.clone(),
            likes: comment.likes.clone(),
            number_of_likes: comment.number_of_likes,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            user: None,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

impl CommentResponse {
    /// Attach the author
    pub fn with_user(mut self, user: Option<&User>) -> Self {
        self.user = user.map(UserResponse::from);
        self
    }
}

impl From<ListPage<Comment>> for CommentsPage {
    fn from(page: ListPage<Comment>) -> Self {
        Self {
            comments: page.items.iter().map(CommentResponse::from).collect(),
            total_comments: page.total,
            last_month_comments: page.last_month,
        }
    }
}
