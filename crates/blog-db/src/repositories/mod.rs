//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.

mod comment;
mod error;
mod post;
mod user;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
