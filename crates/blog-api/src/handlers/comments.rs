//! Comment handlers

use axum::{extract::State, Json};
use blog_core::{Id, SortDirection};
use blog_service::dto::{CommentResponse, CommentsPage, CreateCommentRequest, EditCommentRequest};
use blog_service::CommentService;

use crate::extractors::{ApiPath, ApiQuery, AuthUser, ListParams, ValidatedJson};
use crate::response::{ApiResult, Confirmation};
use crate::state::AppState;

/// Comment on a post
///
/// POST /api/comment/create
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(&auth.identity, request).await?;
    Ok(Json(comment))
}

/// Comments on a post, newest first
///
/// GET /api/comment/getPostComments/:postId
pub async fn get_post_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<Id>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service.post_comments(post_id).await?;
    Ok(Json(comments))
}

/// Toggle the caller's like
///
/// PUT /api/comment/likeComment/:commentId
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Id>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service.toggle_like(&auth.identity, comment_id).await?;
    Ok(Json(comment))
}

/// Edit a comment
///
/// PUT /api/comment/editComment/:commentId
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Id>,
    ValidatedJson(request): ValidatedJson<EditCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .edit_comment(&auth.identity, comment_id, request)
        .await?;
    Ok(Json(comment))
}

/// Delete a comment
///
/// DELETE /api/comment/deleteComment/:commentId
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Id>,
) -> ApiResult<Confirmation> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(&auth.identity, comment_id).await?;
    Ok(Confirmation("Comment has been deleted"))
}

/// Admin listing of comments, oldest first by default
///
/// GET /api/comment/getcomments
pub async fn get_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<CommentsPage>> {
    let service = CommentService::new(state.service_context());
    let page = service
        .list_comments(&auth.identity, params.window(SortDirection::Asc))
        .await?;
    Ok(Json(page))
}
