//! User handlers

use axum::{extract::State, Json};
use blog_core::{Id, SortDirection};
use blog_service::dto::{MessageResponse, UpdateUserRequest, UserResponse, UsersPage};
use blog_service::UserService;

use crate::extractors::{ApiPath, ApiQuery, AuthUser, ListParams, ValidatedJson};
use crate::response::{ApiResult, Confirmation};
use crate::state::AppState;

/// Liveness message
///
/// GET /api/user/test
pub async fn test() -> Json<MessageResponse> {
    Json(MessageResponse::new("API is working!"))
}

/// Update the caller's account
///
/// PUT /api/user/update/:userId
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(user_id): ApiPath<Id>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service
        .update_user(&auth.identity, user_id, request)
        .await?;
    Ok(Json(user))
}

/// Delete an account
///
/// DELETE /api/user/delete/:userId
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(user_id): ApiPath<Id>,
) -> ApiResult<Confirmation> {
    let service = UserService::new(state.service_context());
    service.delete_user(&auth.identity, user_id).await?;
    Ok(Confirmation("User has been deleted"))
}

/// Admin listing of users
///
/// GET /api/user/getusers
pub async fn get_users(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<UsersPage>> {
    let service = UserService::new(state.service_context());
    let page = service
        .list_users(&auth.identity, params.window(SortDirection::Desc))
        .await?;
    Ok(Json(page))
}

/// Public profile of one user
///
/// GET /api/user/:userId
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Id>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}
