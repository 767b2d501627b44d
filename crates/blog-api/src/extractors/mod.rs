//! Axum extractors for request handling
//!
//! Custom extractors for the session cookie, validation, path ids and
//! listing parameters.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use path::ApiPath;
pub use query::{ApiQuery, ListParams, PostQuery};
pub use validated::ValidatedJson;
