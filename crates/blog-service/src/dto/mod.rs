//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreatePostRequest, EditCommentRequest, GoogleAuthRequest,
    SigninRequest, SignupRequest, UpdatePostRequest, UpdateUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    CommentResponse, CommentsPage, HealthChecks, HealthResponse, MessageResponse, NewAccount,
    PostResponse, PostsPage, ReadinessResponse, SignupResponse, UserResponse, UsersPage,
};
