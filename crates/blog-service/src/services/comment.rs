//! Comment service
//!
//! Commenting, likes, moderation and the admin listing.

use std::collections::HashMap;

use blog_core::entities::{Comment, NewComment};
use blog_core::{last_month_cutoff, Id, Identity, ListPage, ListWindow};
use chrono::Utc;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{CommentResponse, CommentsPage, CreateCommentRequest, EditCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::guard::{authorize, Action};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post as the caller
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        identity: &Identity,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        authorize(
            identity,
            Action::CreateComment {
                user_id: request.user_id,
            },
        )?;

        if self
            .ctx
            .post_repo()
            .find_by_id(request.post_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Post"));
        }

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                post_id: request.post_id,
                user_id: request.user_id,
                text: request.content,
            })
            .await?;

        info!(comment_id = %comment.id, post_id = %comment.post_id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    /// Comments on a post, newest first, each with its author
    #[instrument(skip(self))]
    pub async fn post_comments(&self, post_id: Id) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        let mut author_ids: Vec<Id> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Id, _> = self
            .ctx
            .user_repo()
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        Ok(comments
            .iter()
            .map(|c| CommentResponse::from(c).with_user(authors.get(&c.user_id)))
            .collect())
    }

    /// Like the comment, or take the like back
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        identity: &Identity,
        comment_id: Id,
    ) -> ServiceResult<CommentResponse> {
        let comment = self
            .ctx
            .comment_repo()
            .toggle_like(comment_id, identity.user_id)
            .await?;

        debug!(
            comment_id = %comment_id,
            liked = comment.is_liked_by(identity.user_id),
            likes = comment.number_of_likes,
            "Like toggled"
        );

        Ok(CommentResponse::from(comment))
    }

    /// Replace the text of a comment
    #[instrument(skip(self, request))]
    pub async fn edit_comment(
        &self,
        identity: &Identity,
        comment_id: Id,
        request: EditCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;
        let comment = self.find_comment(comment_id).await?;
        authorize(
            identity,
            Action::EditComment {
                author_id: comment.user_id,
            },
        )?;

        let comment = self
            .ctx
            .comment_repo()
            .update_text(comment_id, &request.content)
            .await?;

        info!(comment_id = %comment_id, "Comment edited");

        Ok(CommentResponse::from(comment))
    }

    /// Delete a comment
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, identity: &Identity, comment_id: Id) -> ServiceResult<()> {
        let comment = self.find_comment(comment_id).await?;
        authorize(
            identity,
            Action::DeleteComment {
                author_id: comment.user_id,
            },
        )?;

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, deleted_by = %identity.user_id, "Comment deleted");

        Ok(())
    }

    /// Page of all comments with the dashboard counters
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        identity: &Identity,
        window: ListWindow,
    ) -> ServiceResult<CommentsPage> {
        authorize(identity, Action::ListComments)?;

        let repo = self.ctx.comment_repo();
        let (items, total, last_month) = tokio::try_join!(
            repo.list(&window),
            repo.count(),
            repo.count_created_since(last_month_cutoff(Utc::now())),
        )?;

        Ok(CommentsPage::from(ListPage {
            items,
            total,
            last_month,
        }))
    }

    async fn find_comment(&self, comment_id: Id) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment"))
    }
}
