//! Service context - dependency container for services
//!
//! Holds all repositories, the response cache and the auth helpers needed
//! by services. Built once at startup and shared behind an `Arc`.

use std::sync::Arc;

use linkhub_cache::ResponseCache;
use linkhub_common::{AuthProvidersConfig, JwtService, PasswordService};
use linkhub_core::traits::{LinkRepository, StatsRepository, UserRepository, ViewRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (users, links, views, platform stats)
/// - The response cache (possibly disabled)
/// - Session token and password hashing services
/// - Enabled sign-in providers
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    link_repo: Arc<dyn LinkRepository>,
    view_repo: Arc<dyn ViewRepository>,
    stats_repo: Arc<dyn StatsRepository>,

    // Cache
    cache: ResponseCache,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    auth_providers: AuthProvidersConfig,
}

impl ServiceContext {
    /// Start building a context
    #[must_use]
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the link repository
    pub fn link_repo(&self) -> &dyn LinkRepository {
        self.link_repo.as_ref()
    }

    /// Get the view repository
    pub fn view_repo(&self) -> &dyn ViewRepository {
        self.view_repo.as_ref()
    }

    /// Get the stats repository
    pub fn stats_repo(&self) -> &dyn StatsRepository {
        self.stats_repo.as_ref()
    }

    // === Cache ===

    /// Get the response cache
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password hashing service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Sign-in providers enabled at startup
    pub fn auth_providers(&self) -> &AuthProvidersConfig {
        &self.auth_providers
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("cache_enabled", &self.cache.is_enabled())
            .field("auth_providers", &self.auth_providers)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    link_repo: Option<Arc<dyn LinkRepository>>,
    view_repo: Option<Arc<dyn ViewRepository>>,
    stats_repo: Option<Arc<dyn StatsRepository>>,
    cache: Option<ResponseCache>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<PasswordService>,
    auth_providers: Option<AuthProvidersConfig>,
}

impl ServiceContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn link_repo(mut self, repo: Arc<dyn LinkRepository>) -> Self {
        self.link_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn view_repo(mut self, repo: Arc<dyn ViewRepository>) -> Self {
        self.view_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn stats_repo(mut self, repo: Arc<dyn StatsRepository>) -> Self {
        self.stats_repo = Some(repo);
        self
    }

    /// Response cache; defaults to a disabled cache
    #[must_use]
    pub fn cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    #[must_use]
    pub fn password_service(mut self, service: PasswordService) -> Self {
        self.password_service = Some(service);
        self
    }

    /// Sign-in providers; defaults to credentials only
    #[must_use]
    pub fn auth_providers(mut self, providers: AuthProvidersConfig) -> Self {
        self.auth_providers = Some(providers);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            link_repo: self
                .link_repo
                .ok_or_else(|| ServiceError::validation("link_repo is required"))?,
            view_repo: self
                .view_repo
                .ok_or_else(|| ServiceError::validation("view_repo is required"))?,
            stats_repo: self
                .stats_repo
                .ok_or_else(|| ServiceError::validation("stats_repo is required"))?,
            cache: self.cache.unwrap_or_default(),
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: self
                .password_service
                .ok_or_else(|| ServiceError::validation("password_service is required"))?,
            auth_providers: self.auth_providers.unwrap_or_default(),
        })
    }
}
