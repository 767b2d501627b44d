//! Comment model -> entity mapper

use blog_core::{Comment, Id};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Id::new(model.id),
            post_id: Id::new(model.post_id),
            user_id: Id::new(model.user_id),
            text: model.text,
            likes: model.likes.into_iter().map(Id::new).collect(),
            number_of_likes: model.number_of_likes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
