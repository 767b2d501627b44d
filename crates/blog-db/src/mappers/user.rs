//! User model -> entity mapper

use blog_core::{Id, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Id::new(model.id),
            username: model.username,
            email: model.email,
            profile_picture: model.profile_picture,
            is_admin: model.is_admin,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
