//! Profile handlers
//!
//! Endpoints for the caller's profile, theme and account.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use linkhub_service::dto::{
    ProfileResponse, SuccessResponse, ThemeResponse, UpdateProfileRequest, UpdateThemeRequest,
};
use linkhub_service::ProfileService;

use super::auth::clear_session;
use crate::extractors::{AuthUser, JsonBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let profile = service.get_profile(auth.user_id).await?;
    Ok(Json(profile))
}

/// Update the caller's profile
///
/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let profile = service.update_profile(auth.user_id, request).await?;
    Ok(Json(profile))
}

/// Get the caller's theme
///
/// GET /api/theme
pub async fn get_theme(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ThemeResponse>> {
    let service = ProfileService::new(state.service_context());
    let theme = service.get_theme(auth.user_id).await?;
    Ok(Json(theme))
}

/// Set the caller's theme
///
/// PUT /api/theme
pub async fn update_theme(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<UpdateThemeRequest>,
) -> ApiResult<Json<ThemeResponse>> {
    let service = ProfileService::new(state.service_context());
    let theme = service.update_theme(auth.user_id, request).await?;
    Ok(Json(theme))
}

/// Delete the caller's account and end the session
///
/// DELETE /api/account
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let service = ProfileService::new(state.service_context());
    service.delete_account(auth.user_id).await?;
    Ok((clear_session(jar, state.cookie()), Json(SuccessResponse::ok())))
}
