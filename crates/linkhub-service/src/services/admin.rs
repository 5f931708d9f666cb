//! Admin service
//!
//! User management and platform statistics. The caller's admin status is
//! re-checked against persistence on every request, so a demoted or
//! deactivated admin loses access without waiting for their session to
//! expire.

use chrono::Utc;
use linkhub_cache::CacheKey;
use linkhub_core::{DomainError, Role, User, UserId, UserQuery, UserStatusFilter};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AccountResponse, AdminCreateUserRequest, AdminLinkResponse, AdminUpdateUserRequest,
    AdminUserDetailResponse, AdminUserResponse, AdminUserSummary, CreatedUserResponse,
    ListUsersParams, MessageResponse, PageMeta, StatsResponse, UserListResponse, ViewResponse,
};

use super::auth::{create_account, NewAccount};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::profile::invalidate_user;

/// Views included in the user detail
const RECENT_VIEWS: i64 = 10;

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
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

    /// Confirm that `user_id` is a stored, active admin
    #[instrument(skip(self))]
    pub async fn authorize(&self, user_id: UserId) -> ServiceResult<User> {
        match self.ctx.user_repo().find_by_id(user_id).await? {
            Some(user) if user.can_administer() => Ok(user),
            _ => {
                warn!(user_id = %user_id, "Admin access denied");
                Err(DomainError::AdminRequired.into())
            }
        }
    }

    /// Filtered, paged user listing, newest first
    #[instrument(skip(self))]
    pub async fn list_users(&self, params: ListUsersParams) -> ServiceResult<UserListResponse> {
        let query = user_query(params)?;
        let page = self.ctx.user_repo().list(&query).await?;

        Ok(UserListResponse {
            users: page.users.iter().map(AdminUserSummary::from).collect(),
            pagination: PageMeta::new(query.page, query.limit, page.total),
        })
    }

    /// Create a user with an explicit role and active flag
    #[instrument(skip(self, request))]
    pub async fn create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> ServiceResult<CreatedUserResponse> {
        request.validate()?;

        let user = create_account(
            self.ctx,
            NewAccount {
                email: request.email.unwrap_or_default(),
                password: request.password.unwrap_or_default(),
                name: request.name.unwrap_or_default(),
                username: request.username.unwrap_or_default(),
                role: request.role.unwrap_or_default(),
                is_active: request.is_active.unwrap_or(true),
            },
        )
        .await?;

        Ok(CreatedUserResponse::new(AccountResponse::from(&user)))
    }

    /// Full record of one user with links, latest views and counts
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<AdminUserDetailResponse> {
        let user = self.load(user_id).await?;
        let links = self.ctx.link_repo().find_by_user(user_id).await?;
        let views = self
            .ctx
            .view_repo()
            .recent_by_user(user_id, RECENT_VIEWS)
            .await?;
        let counts = self.ctx.user_repo().counts(user_id).await?;

        Ok(AdminUserDetailResponse {
            user: AdminUserResponse::new(&user, counts),
            links: links.iter().map(AdminLinkResponse::from).collect(),
            views: views.iter().map(ViewResponse::from).collect(),
        })
    }

    /// Partial update of any user
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: UserId,
        request: AdminUpdateUserRequest,
    ) -> ServiceResult<AdminUserResponse> {
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
        if let Some(theme) = request.theme {
            user.theme = theme;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }
        user.touch();

        self.ctx.user_repo().update(&user).await?;
        info!(user_id = %user_id, role = user.role.as_str(), is_active = user.is_active, "User updated by admin");

        invalidate_user(self.ctx, &user, &old_username).await;

        let counts = self.ctx.user_repo().counts(user_id).await?;
        Ok(AdminUserResponse::new(&user, counts))
    }

    /// Delete any user but the calling admin
    #[instrument(skip(self))]
    pub async fn delete_user(
        &self,
        admin_id: UserId,
        user_id: UserId,
    ) -> ServiceResult<MessageResponse> {
        let user = self.load(user_id).await?;
        if user_id == admin_id {
            return Err(DomainError::CannotDeleteSelf.into());
        }

        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "User deleted by admin");

        self.ctx
            .cache()
            .invalidate(&CacheKey::all_for_user(user_id, &user.username))
            .await;
        Ok(MessageResponse::new("User deleted successfully"))
    }

    /// Platform-wide statistics as of now
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<StatsResponse> {
        let stats = self.ctx.stats_repo().platform_stats(Utc::now()).await?;
        Ok(StatsResponse::from(&stats))
    }
}

/// Normalize listing parameters: page at least 1, limit within 1..=100
fn user_query(params: ListUsersParams) -> ServiceResult<UserQuery> {
    let role = params
        .role
        .filter(|r| !r.is_empty())
        .map(|r| r.parse::<Role>())
        .transpose()
        .map_err(|e| ServiceError::validation(e.to_string()))?;

    Ok(UserQuery {
        page: params.page.unwrap_or(1).max(1),
        limit: params
            .limit
            .unwrap_or(UserQuery::DEFAULT_LIMIT)
            .clamp(1, UserQuery::MAX_LIMIT),
        search: params.search,
        role,
        status: params.status.and_then(|s| s.parse::<UserStatusFilter>().ok()),
    })
}
