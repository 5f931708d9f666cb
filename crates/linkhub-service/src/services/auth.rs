//! Authentication service
//!
//! Handles credentials sign-up and sign-in, and lists the enabled sign-in
//! providers. Sessions are stateless signed tokens, so sign-out needs no
//! server-side work beyond clearing the cookie.

use linkhub_common::{AppError, AuthProvider};
use linkhub_core::{DomainError, Role, User, UserId};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AccountResponse, CreatedUserResponse, LoginRequest, LoginResponse, RegisterRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Fields of a new account, already validated
pub(crate) struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
}

/// Create a user after checking email then username uniqueness
pub(crate) async fn create_account(ctx: &ServiceContext, account: NewAccount) -> ServiceResult<User> {
    if ctx.user_repo().email_exists(&account.email).await? {
        return Err(DomainError::EmailAlreadyExists.into());
    }
    if ctx.user_repo().username_taken(&account.username, None).await? {
        return Err(DomainError::UsernameAlreadyExists.into());
    }

    let password_hash = ctx.password_service().hash(&account.password)?;

    let mut user = User::new(UserId::new(), account.email, account.name, account.username);
    user.role = account.role;
    user.is_active = account.is_active;

    ctx.user_repo().create(&user, &password_hash).await?;
    info!(user_id = %user.id, role = user.role.as_str(), "User created");

    Ok(user)
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user with role `user`
    #[instrument(skip(self, request), fields(username = ?request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CreatedUserResponse> {
        request.validate()?;

        let user = create_account(
            self.ctx,
            NewAccount {
                email: request.email.unwrap_or_default(),
                password: request.password.unwrap_or_default(),
                name: request.name.unwrap_or_default(),
                username: request.username.unwrap_or_default(),
                role: Role::User,
                is_active: true,
            },
        )
        .await?;

        Ok(CreatedUserResponse::new(AccountResponse::from(&user)))
    }

    /// Login with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        request.validate()?;
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: invalid password"))?;

        let session = self.ctx.jwt_service().issue_session(&user)?;
        info!(user_id = %user.id, "User logged in successfully");

        Ok(LoginResponse {
            token: session.token,
            expires_in: session.expires_in,
            user: AccountResponse::from(&user),
        })
    }

    /// Enabled sign-in providers, credentials first
    #[must_use]
    pub fn providers(&self) -> Vec<AuthProvider> {
        self.ctx.auth_providers().enabled()
    }
}
