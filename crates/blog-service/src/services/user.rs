//! User service
//!
//! Account updates, deletion and the admin listing.

use blog_core::entities::UserChanges;
use blog_core::{last_month_cutoff, Id, Identity, ListPage, ListWindow};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{UpdateUserRequest, UserResponse, UsersPage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::guard::{authorize, Action};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a single user
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Id) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        Ok(UserResponse::from(user))
    }

    /// Update the caller's own account
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        identity: &Identity,
        user_id: Id,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;
        authorize(identity, Action::UpdateUser { user_id })?;

        let mut changes = UserChanges {
            username: non_empty(request.username),
            email: non_empty(request.email),
            profile_picture: non_empty(request.profile_picture),
            password_hash: None,
        };
        if let Some(password) = non_empty(request.password) {
            changes.password_hash = Some(self.ctx.password_service().hash(&password)?);
        }

        if changes.is_empty() {
            return self.get_user(user_id).await;
        }

        let user = self.ctx.user_repo().update(user_id, &changes).await?;

        info!(user_id = %user_id, "User updated");

        Ok(UserResponse::from(user))
    }

    /// Delete an account with everything it owns
    #[instrument(skip(self))]
    pub async fn delete_user(&self, identity: &Identity, user_id: Id) -> ServiceResult<()> {
        authorize(identity, Action::DeleteUser { user_id })?;

        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, deleted_by = %identity.user_id, "User deleted");

        Ok(())
    }

    /// Page of users with the dashboard counters
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        identity: &Identity,
        window: ListWindow,
    ) -> ServiceResult<UsersPage> {
        authorize(identity, Action::ListUsers)?;

        let repo = self.ctx.user_repo();
        let (items, total, last_month) = tokio::try_join!(
            repo.list(&window),
            repo.count(),
            repo.count_created_since(last_month_cutoff(Utc::now())),
        )?;

        Ok(UsersPage::from(ListPage {
            items,
            total,
            last_month,
        }))
    }
}

/// Drop empty strings so they leave the column untouched
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
