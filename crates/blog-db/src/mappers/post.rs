//! Post model -> entity mapper

use blog_core::{Id, Post};

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Id::new(model.id),
            author_id: Id::new(model.author_id),
            title: model.title,
            slug: model.slug,
            content: model.content,
            category: model.category,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
