//! Domain entities - core business objects

mod comment;
mod post;
mod user;

pub use comment::{Comment, LikeToggle, NewComment};
pub use post::{NewPost, Post, PostChanges, DEFAULT_CATEGORY};
pub use user::{validate_username, NewUser, User, UserChanges, DEFAULT_PROFILE_PICTURE};
