//! # blog-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    validate_username, Comment, LikeToggle, NewComment, NewPost, NewUser, Post, PostChanges, User,
    UserChanges, DEFAULT_CATEGORY, DEFAULT_PROFILE_PICTURE,
};
pub use error::DomainError;
pub use traits::{CommentRepository, PostFilter, PostRepository, RepoResult, UserRepository};
pub use value_objects::{
    last_month_cutoff, Id, IdParseError, Identity, ListPage, ListWindow, Slug, SortDirection,
};
