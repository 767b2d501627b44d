//! Authorization guard
//!
//! Every protected operation names an [`Action`]; [`authorize`] checks the
//! caller's identity against it before any data is touched.

use blog_core::{Id, Identity};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Operation a caller is attempting, with the ids the rule depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Update the account `user_id`
    UpdateUser { user_id: Id },
    /// Delete the account `user_id`
    DeleteUser { user_id: Id },
    ListUsers,
    CreatePost,
    /// Update a post; `user_id` is the user named in the request path
    UpdatePost { user_id: Id },
    /// Delete a post; `user_id` is the user named in the request path
    DeletePost { user_id: Id },
    /// Comment as `user_id`
    CreateComment { user_id: Id },
    EditComment { author_id: Id },
    DeleteComment { author_id: Id },
    ListComments,
}

impl Action {
    /// Whether the identity may perform this action
    pub fn is_permitted(self, identity: &Identity) -> bool {
        match self {
            Self::UpdateUser { user_id } | Self::CreateComment { user_id } => {
                identity.is(user_id)
            }
            Self::DeleteUser { user_id } => identity.is_admin || identity.is(user_id),
            Self::UpdatePost { user_id } | Self::DeletePost { user_id } => {
                identity.is_admin && identity.is(user_id)
            }
            Self::EditComment { author_id } | Self::DeleteComment { author_id } => {
                identity.is_admin || identity.is(author_id)
            }
            Self::ListUsers | Self::CreatePost | Self::ListComments => identity.is_admin,
        }
    }

    /// Message returned to a caller who is denied
    pub const fn denial_message(self) -> &'static str {
        match self {
            Self::UpdateUser { .. } => "You are not allowed to update this user",
            Self::DeleteUser { .. } => "You are not allowed to delete this user",
            Self::ListUsers => "You are not allowed to see all users",
            Self::CreatePost => "You are not allowed to create a post",
            Self::UpdatePost { .. } => "You are not allowed to update this post",
            Self::DeletePost { .. } => "You are not allowed to delete this post",
            Self::CreateComment { .. } => "You are not allowed to create this comment",
            Self::EditComment { .. } => "You are not allowed to edit this comment",
            Self::DeleteComment { .. } => "You are not allowed to delete this comment",
            Self::ListComments => "You are not allowed to get all comments",
        }
    }
}

/// Require that `identity` may perform `action`
///
/// # Errors
/// Returns `ServiceError::Forbidden` with the action's denial message
pub fn authorize(identity: &Identity, action: Action) -> ServiceResult<()> {
    if action.is_permitted(identity) {
        return Ok(());
    }

    warn!(
        user_id = %identity.user_id,
        is_admin = identity.is_admin,
        ?action,
        "Permission denied"
    );
    Err(ServiceError::forbidden(action.denial_message()))
}
