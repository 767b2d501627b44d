//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects.
//! The password hash never leaves this crate through these mappers.

mod comment;
mod post;
mod user;
