//! Route definitions
//!
//! All API routes organized by resource and mounted under /api.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, comments, health, posts, users};
use crate::response::route_not_found;
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Everything under /api; unknown paths get the uniform 404 body
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .fallback(route_not_found)
}

/// Health check routes
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/google", post(auth::google))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/test", get(users::test))
        .route("/user/update/:userId", put(users::update_user))
        .route("/user/delete/:userId", delete(users::delete_user))
        .route("/user/signout", post(auth::signout))
        .route("/user/getusers", get(users::get_users))
        .route("/user/:userId", get(users::get_user))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/post/create", post(posts::create_post))
        .route("/post/getposts", get(posts::get_posts))
        .route("/post/updatepost/:postId/:userId", put(posts::update_post))
        .route("/post/deletepost/:postId/:userId", delete(posts::delete_post))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comment/create", post(comments::create_comment))
        .route(
            "/comment/getPostComments/:postId",
            get(comments::get_post_comments),
        )
        .route("/comment/likeComment/:commentId", put(comments::like_comment))
        .route("/comment/editComment/:commentId", put(comments::edit_comment))
        .route(
            "/comment/deleteComment/:commentId",
            delete(comments::delete_comment),
        )
        .route("/comment/getcomments", get(comments::get_comments))
}
