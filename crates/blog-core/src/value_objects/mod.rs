//! Value objects - immutable types that represent domain concepts

mod id;
mod identity;
mod slug;
mod window;

pub use id::{Id, IdParseError};
pub use identity::Identity;
pub use slug::Slug;
pub use window::{last_month_cutoff, ListPage, ListWindow, SortDirection};
