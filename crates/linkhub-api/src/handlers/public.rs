//! Public handlers
//!
//! Unauthenticated endpoints: public pages and view recording.

use axum::{
    extract::{Path, State},
    Json,
};
use linkhub_service::dto::{PublicPageResponse, RecordViewRequest, SuccessResponse};
use linkhub_service::PublicService;
use tracing::debug;

use crate::extractors::{ClientInfo, JsonBody, UsernamePath};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Public page of a user
///
/// GET /api/public/{username}
pub async fn public_page(
    State(state): State<AppState>,
    Path(path): Path<UsernamePath>,
) -> ApiResult<Json<PublicPageResponse>> {
    let service = PublicService::new(state.service_context());
    let page = service.public_page(&path.username).await?;
    Ok(Json(page))
}

/// Record a page view
///
/// POST /api/views/{username}
///
/// The body is optional. A body that is not readable JSON is ignored and
/// the view is recorded from request headers alone.
pub async fn record_view(
    State(state): State<AppState>,
    Path(path): Path<UsernamePath>,
    ClientInfo(viewer): ClientInfo,
    body: Result<JsonBody<RecordViewRequest>, ApiError>,
) -> ApiResult<Json<SuccessResponse>> {
    let request = match body {
        Ok(JsonBody(request)) => request,
        Err(e) => {
            debug!(username = %path.username, error = %e, "Ignoring unreadable view body");
            RecordViewRequest::default()
        }
    };

    let service = PublicService::new(state.service_context());
    service.record_view(&path.username, request, viewer).await?;
    Ok(Json(SuccessResponse::ok()))
}
