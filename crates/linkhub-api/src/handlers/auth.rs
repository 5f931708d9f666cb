//! Authentication handlers
//!
//! Endpoints for registration, credentials sign-in, sign-out, the current
//! session and the enabled sign-in providers.

use axum::{extract::State, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use linkhub_common::{AuthProvider, SessionClaims};
use linkhub_service::dto::{CreatedUserResponse, LoginRequest, LoginResponse, RegisterRequest};
use linkhub_service::AuthService;

use crate::extractors::{AuthUser, JsonBody};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::{AppState, SessionCookie};

/// Session cookie carrying `token`
pub(crate) fn session_cookie(settings: &SessionCookie, token: String) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}

/// Expire the session cookie
pub(crate) fn clear_session(jar: CookieJar, settings: &SessionCookie) -> CookieJar {
    jar.remove(Cookie::build(settings.name.clone()).path("/"))
}

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Created<Json<CreatedUserResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;

    let jar = jar.add(session_cookie(state.cookie(), response.token.clone()));
    Ok((jar, Json(response)))
}

/// Logout
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, NoContent) {
    (clear_session(jar, state.cookie()), NoContent)
}

/// Claims of the current session
///
/// GET /api/auth/session
pub async fn session(auth: AuthUser) -> Json<SessionClaims> {
    Json(auth.claims)
}

/// Enabled sign-in providers
///
/// GET /api/auth/providers
pub async fn providers(State(state): State<AppState>) -> Json<Vec<AuthProvider>> {
    let service = AuthService::new(state.service_context());
    Json(service.providers())
}
