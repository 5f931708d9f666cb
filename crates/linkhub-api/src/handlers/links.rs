//! Link handlers
//!
//! Endpoints for the caller's own links.

use axum::{
    extract::{Path, State},
    Json,
};
use linkhub_service::dto::{
    CreateLinkRequest, LinkResponse, ReorderLinksRequest, SuccessResponse, UpdateLinkRequest,
};
use linkhub_service::LinkService;

use crate::extractors::{AuthUser, JsonBody, LinkIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// List the caller's links
///
/// GET /api/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<LinkResponse>>> {
    let service = LinkService::new(state.service_context());
    let links = service.list_links(auth.user_id).await?;
    Ok(Json(links))
}

/// Create a link
///
/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<CreateLinkRequest>,
) -> ApiResult<Json<LinkResponse>> {
    let service = LinkService::new(state.service_context());
    let link = service.create_link(auth.user_id, request).await?;
    Ok(Json(link))
}

/// Update an owned link
///
/// PUT /api/links/{id}
pub async fn update_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<LinkIdPath>,
    JsonBody(request): JsonBody<UpdateLinkRequest>,
) -> ApiResult<Json<LinkResponse>> {
    let link_id = path.link_id()?;

    let service = LinkService::new(state.service_context());
    let link = service.update_link(auth.user_id, link_id, request).await?;
    Ok(Json(link))
}

/// Delete an owned link
///
/// DELETE /api/links/{id}
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<LinkIdPath>,
) -> ApiResult<Json<SuccessResponse>> {
    let link_id = path.link_id()?;

    let service = LinkService::new(state.service_context());
    service.delete_link(auth.user_id, link_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Reorder links
///
/// PUT /api/links/reorder
pub async fn reorder_links(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<ReorderLinksRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = LinkService::new(state.service_context());
    service.reorder_links(auth.user_id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}
