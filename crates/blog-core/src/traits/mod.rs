//! Repository ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{CommentRepository, PostFilter, PostRepository, RepoResult, UserRepository};
