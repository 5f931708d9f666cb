//! Authentication extractors
//!
//! The session token is read from the session cookie, falling back to an
//! `Authorization: Bearer` header. Validation is purely cryptographic, so a
//! rejected request never reaches persistence or the cache.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use linkhub_common::SessionClaims;
use linkhub_core::{User, UserId};
use linkhub_service::AdminService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub claims: SessionClaims,
}

async fn session_token<S>(parts: &mut Parts, state: &S, cookie_name: &str) -> Option<String>
where
    S: Send + Sync,
{
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = session_token(parts, state, &app_state.cookie().name)
            .await
            .ok_or(ApiError::Unauthorized)?;

        let claims = app_state.jwt_service().validate_session(&token).map_err(|e| {
            tracing::warn!(error = %e, "Invalid session token");
            ApiError::Unauthorized
        })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::Unauthorized
        })?;

        Ok(Self { user_id, claims })
    }
}

/// Authenticated user whose stored record is an active admin
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: User,
}

impl AdminUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let user = AdminService::new(app_state.service_context())
            .authorize(auth.user_id)
            .await?;

        Ok(Self { user })
    }
}
