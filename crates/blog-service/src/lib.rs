//! # blog-service
//!
//! Application layer containing authorization rules, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use services::{
    authorize, Action, AuthService, AuthSession, CommentService, PostService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
