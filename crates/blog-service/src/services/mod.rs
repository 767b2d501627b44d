//! Business logic services
//!
//! Each service validates what the DTOs cannot, asks the guard, talks to the
//! repositories and shapes the response.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod guard;
pub mod post;
pub mod user;

// Re-export all services for convenience
pub use auth::{AuthService, AuthSession};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{validation_message, ServiceError, ServiceResult};
pub use guard::{authorize, Action};
pub use post::PostService;
pub use user::UserService;
