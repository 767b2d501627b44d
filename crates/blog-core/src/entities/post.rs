//! Post entity - an article written by an admin

use chrono::{DateTime, Utc};

use crate::value_objects::{Id, Slug};

/// Category assigned when a post is created without one
pub const DEFAULT_CATEGORY: &str = "general";

/// Blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Id,
    pub author_id: Id,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: Id,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
}

impl NewPost {
    /// Build a post draft, deriving the slug from the title
    pub fn new(author_id: Id, title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        let slug = Slug::from_title(&title).into_inner();
        Self {
            author_id,
            title,
            slug,
            content: content.into(),
            category: DEFAULT_CATEGORY.to_string(),
            image: None,
        }
    }

    /// Set the category; blank values keep the default
    pub fn with_category(mut self, category: Option<String>) -> Self {
        if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
            self.category = category;
        }
        self
    }

    /// Set the image; blank values mean no image
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|i| !i.trim().is_empty());
        self
    }
}

/// Partial update of a post; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl PostChanges {
    /// Replace the title, re-deriving the slug alongside it
    pub fn set_title(&mut self, title: String) {
        self.slug = Some(Slug::from_title(&title).into_inner());
        self.title = Some(title);
    }
}
