//! Profile service
//!
//! The signed-in user's own profile, theme and account.

use linkhub_cache::CacheKey;
use linkhub_core::{DomainError, User, UserId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ProfileResponse, ThemeResponse, UpdateProfileRequest, UpdateThemeRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?)
    }

    /// Caller's profile, read through the cache
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: UserId) -> ServiceResult<ProfileResponse> {
        let key = CacheKey::Profile(user_id);
        if let Some(cached) = self.ctx.cache().get::<ProfileResponse>(&key).await {
            return Ok(cached);
        }

        let user = self.load(user_id).await?;
        let response = ProfileResponse::from(&user);

        self.ctx.cache().put(&key, &response).await;
        Ok(response)
    }

    /// Partial update of name, username, bio and avatar
    ///
    /// A username owned by anyone else fails before anything is written.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;
        let mut user = self.load(user_id).await?;
        let old_username = user.username.clone();

        if let Some(username) = request.username.filter(|u| !u.is_empty()) {
            if username != user.username {
                if self
                    .ctx
                    .user_repo()
                    .username_taken(&username, Some(user_id))
                    .await?
                {
                    return Err(ServiceError::conflict("Username already taken"));
                }
                user.username = username;
            }
        }
        if let Some(name) = request.name.filter(|n| !n.trim().is_empty()) {
            user.name = name;
        }
        if let Some(bio) = request.bio {
            user.bio = bio;
        }
        if let Some(avatar) = request.avatar {
            user.avatar = avatar;
        }
        user.touch();

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user_id, "Profile updated");

        invalidate_user(self.ctx, &user, &old_username).await;
        Ok(ProfileResponse::from(&user))
    }

    /// Caller's current theme
    #[instrument(skip(self))]
    pub async fn get_theme(&self, user_id: UserId) -> ServiceResult<ThemeResponse> {
        let user = self.load(user_id).await?;
        Ok(ThemeResponse::from(&user))
    }

    /// Switch the caller's theme
    #[instrument(skip(self, request))]
    pub async fn update_theme(
        &self,
        user_id: UserId,
        request: UpdateThemeRequest,
    ) -> ServiceResult<ThemeResponse> {
        request.validate()?;
        let theme = request.parsed().ok_or(DomainError::InvalidTheme)?;

        let mut user = self.load(user_id).await?;
        user.set_theme(theme);

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user_id, theme = theme.as_str(), "Theme updated");

        self.ctx
            .cache()
            .invalidate(&[
                CacheKey::Profile(user_id),
                CacheKey::PublicPage(user.username.clone()),
            ])
            .await;
        Ok(ThemeResponse::from(&user))
    }

    /// Delete the caller together with their links and views
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: UserId) -> ServiceResult<()> {
        let user = self.load(user_id).await?;

        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "Account deleted");

        self.ctx
            .cache()
            .invalidate(&CacheKey::all_for_user(user_id, &user.username))
            .await;
        Ok(())
    }
}

/// Drop every cached projection of `user`, including the public page under
/// a username it no longer holds
pub(crate) async fn invalidate_user(ctx: &ServiceContext, user: &User, old_username: &str) {
    let mut keys = CacheKey::all_for_user(user.id, &user.username);
    if old_username != user.username {
        keys.push(CacheKey::PublicPage(old_username.to_string()));
    }
    ctx.cache().invalidate(&keys).await;
}
