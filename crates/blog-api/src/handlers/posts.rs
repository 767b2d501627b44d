//! Post handlers

use axum::{extract::State, Json};
use blog_core::Id;
use blog_service::dto::{CreatePostRequest, PostResponse, PostsPage, UpdatePostRequest};
use blog_service::PostService;

use crate::extractors::{ApiPath, ApiQuery, AuthUser, PostQuery, ValidatedJson};
use crate::response::{ApiResult, Confirmation, Created};
use crate::state::AppState;

/// Publish a post
///
/// POST /api/post/create
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(&auth.identity, request).await?;
    Ok(Created(Json(post)))
}

/// Filtered listing of posts
///
/// GET /api/post/getposts
pub async fn get_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PostQuery>,
) -> ApiResult<Json<PostsPage>> {
    let service = PostService::new(state.service_context());
    let page = service.list_posts(query.filter()?, query.window()).await?;
    Ok(Json(page))
}

/// Update a post
///
/// PUT /api/post/updatepost/:postId/:userId
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((post_id, user_id)): ApiPath<(Id, Id)>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service
        .update_post(&auth.identity, post_id, user_id, request)
        .await?;
    Ok(Json(post))
}

/// Delete a post
///
/// DELETE /api/post/deletepost/:postId/:userId
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((post_id, user_id)): ApiPath<(Id, Id)>,
) -> ApiResult<Confirmation> {
    let service = PostService::new(state.service_context());
    service.delete_post(&auth.identity, post_id, user_id).await?;
    Ok(Confirmation("The post has been deleted"))
}
