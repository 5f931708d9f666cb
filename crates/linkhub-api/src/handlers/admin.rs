//! Admin handlers
//!
//! User management and platform statistics. Every endpoint requires an
//! active admin.

use axum::{
    extract::{Path, State},
    Json,
};
use linkhub_service::dto::{
    AdminCreateUserRequest, AdminUpdateUserRequest, AdminUserDetailResponse, AdminUserResponse,
    CreatedUserResponse, ListUsersParams, MessageResponse, StatsResponse, UserListResponse,
};
use linkhub_service::AdminService;

use crate::extractors::{AdminUser, JsonBody, QueryParams, UserIdPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List users
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(params): QueryParams<ListUsersParams>,
) -> ApiResult<Json<UserListResponse>> {
    let service = AdminService::new(state.service_context());
    let users = service.list_users(params).await?;
    Ok(Json(users))
}

/// Create a user
///
/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(request): JsonBody<AdminCreateUserRequest>,
) -> ApiResult<Created<Json<CreatedUserResponse>>> {
    let service = AdminService::new(state.service_context());
    let response = service.create_user(request).await?;
    Ok(Created(Json(response)))
}

/// Get a user with links, recent views and counts
///
/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<AdminUserDetailResponse>> {
    let user_id = path.user_id()?;

    let service = AdminService::new(state.service_context());
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}

/// Update a user
///
/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(path): Path<UserIdPath>,
    JsonBody(request): JsonBody<AdminUpdateUserRequest>,
) -> ApiResult<Json<AdminUserResponse>> {
    let user_id = path.user_id()?;

    let service = AdminService::new(state.service_context());
    let user = service.update_user(user_id, request).await?;
    Ok(Json(user))
}

/// Delete a user other than the caller
///
/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = path.user_id()?;

    let service = AdminService::new(state.service_context());
    let response = service.delete_user(admin.id(), user_id).await?;
    Ok(Json(response))
}

/// Platform statistics
///
/// GET /api/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<StatsResponse>> {
    let service = AdminService::new(state.service_context());
    let stats = service.stats().await?;
    Ok(Json(stats))
}
