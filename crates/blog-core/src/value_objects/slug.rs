//! URL slug derived from a post title

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase, hyphen-separated, URL-safe form of a title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a title.
    ///
    /// Whitespace runs collapse into a single `-`, then everything outside
    /// `[a-z0-9-]` is dropped. Applying it to its own output is a no-op.
    pub fn from_title(title: &str) -> Self {
        let joined = title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();

        let slug = joined
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();

        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
