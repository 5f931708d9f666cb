//! Test support: in-memory repositories and a ready-made service context
//!
//! Available to this crate's unit tests and, through the `testing`
//! feature, to the API crate's router tests.

mod memory;

use std::sync::Arc;

use linkhub_cache::{MemoryCache, ResponseCache};
use linkhub_common::{AuthProvidersConfig, JwtService, PasswordConfig, PasswordService};
use linkhub_core::traits::UserRepository;
use linkhub_core::{Role, User, UserId};

pub use memory::{
    InMemoryLinkRepository, InMemoryStatsRepository, InMemoryStore, InMemoryUserRepository,
    InMemoryViewRepository,
};

use crate::services::ServiceContext;

/// Password every seeded user signs in with
pub const TEST_PASSWORD: &str = "password123";

/// Secret the test `JwtService` signs with
pub const TEST_SESSION_SECRET: &str = "test-session-secret";

/// A `ServiceContext` over in-memory repositories and an in-memory cache,
/// with handles to every backend for assertions
pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub store: Arc<InMemoryStore>,
    pub users: Arc<InMemoryUserRepository>,
    pub links: Arc<InMemoryLinkRepository>,
    pub views: Arc<InMemoryViewRepository>,
    pub stats: Arc<InMemoryStatsRepository>,
    pub cache_backend: Arc<MemoryCache>,
}

impl TestContext {
    /// Context with the cache enabled and credentials sign-in only
    ///
    /// # Panics
    /// Panics if the fixed test hashing parameters are rejected
    #[must_use]
    pub fn new() -> Self {
        Self::with_providers(AuthProvidersConfig::default())
    }

    /// Context with the given sign-in providers
    ///
    /// # Panics
    /// Panics if the fixed test hashing parameters are rejected
    #[must_use]
    pub fn with_providers(providers: AuthProvidersConfig) -> Self {
        let store = InMemoryStore::new();
        let users = Arc::new(InMemoryUserRepository::new(Arc::clone(&store)));
        let links = Arc::new(InMemoryLinkRepository::new(Arc::clone(&store)));
        let views = Arc::new(InMemoryViewRepository::new(Arc::clone(&store)));
        let stats = Arc::new(InMemoryStatsRepository::new(Arc::clone(&store)));
        let cache_backend = Arc::new(MemoryCache::new());

        // Cheap parameters keep the test suite fast
        let password_service = PasswordService::new(PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
        })
        .expect("test password parameters are valid");

        let ctx = ServiceContext::builder()
            .user_repo(users.clone())
            .link_repo(links.clone())
            .view_repo(views.clone())
            .stats_repo(stats.clone())
            .cache(ResponseCache::new(cache_backend.clone()))
            .jwt_service(Arc::new(JwtService::new(TEST_SESSION_SECRET, 3600)))
            .password_service(password_service)
            .auth_providers(providers)
            .build()
            .map(Arc::new)
            .expect("all dependencies are set");

        Self {
            ctx,
            store,
            users,
            links,
            views,
            stats,
            cache_backend,
        }
    }

    /// Insert an active user with role `user` and [`TEST_PASSWORD`]
    ///
    /// # Panics
    /// Panics if the username or derived email is already taken
    pub async fn seed_user(&self, username: &str) -> User {
        self.seed(username, Role::User).await
    }

    /// Insert an active admin with [`TEST_PASSWORD`]
    ///
    /// # Panics
    /// Panics if the username or derived email is already taken
    pub async fn seed_admin(&self, username: &str) -> User {
        self.seed(username, Role::Admin).await
    }

    async fn seed(&self, username: &str, role: Role) -> User {
        let mut user = User::new(
            UserId::new(),
            format!("{username}@example.com"),
            username.to_string(),
            username.to_string(),
        );
        user.role = role;

        let hash = self
            .ctx
            .password_service()
            .hash(TEST_PASSWORD)
            .expect("hashing succeeds");
        self.users
            .create(&user, &hash)
            .await
            .expect("seeded user is unique");
        user
    }

    /// Issue a session token for a seeded user
    ///
    /// # Panics
    /// Panics if token encoding fails
    #[must_use]
    pub fn token_for(&self, user: &User) -> String {
        self.ctx
            .jwt_service()
            .issue_session(user)
            .expect("token encodes")
            .token
    }

    /// Calls made to any repository so far, seeding included
    #[must_use]
    pub fn persistence_calls(&self) -> usize {
        self.users.calls() + self.links.calls() + self.views.calls() + self.stats.calls()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
