//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Link, PlatformStats, User, UserCounts, UserPage, UserQuery, View};
use crate::error::DomainError;
use crate::value_objects::{LinkId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if email is already registered
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if a username belongs to any user other than `exclude`
    async fn username_taken(&self, username: &str, exclude: Option<UserId>) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user; `UserNotFound` when the row is gone
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Hard delete a user together with its links and views
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Filtered, paged listing ordered by creation time (newest first)
    async fn list(&self, query: &UserQuery) -> RepoResult<UserPage>;

    /// Owned link and view counts
    async fn counts(&self, id: UserId) -> RepoResult<UserCounts>;

    /// Round-trip to the backing store
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Link Repository
// ============================================================================

#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// All links of a user in display order
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Link>>;

    /// Active links of a user in display order
    async fn find_active_by_user(&self, user_id: UserId) -> RepoResult<Vec<Link>>;

    /// Find a link only if `user_id` owns it
    async fn find_owned(&self, id: LinkId, user_id: UserId) -> RepoResult<Option<Link>>;

    /// Highest order value among the user's links
    async fn max_order(&self, user_id: UserId) -> RepoResult<Option<i32>>;

    /// Create a new link
    async fn create(&self, link: &Link) -> RepoResult<()>;

    /// Update title, url, order and active flag of an owned link
    async fn update(&self, link: &Link) -> RepoResult<()>;

    /// Delete an owned link; `LinkNotFound` when nothing matched
    async fn delete(&self, id: LinkId, user_id: UserId) -> RepoResult<()>;

    /// Apply all `(id, order)` pairs atomically
    ///
    /// Fails with `LinkNotFound` and changes nothing when any id is not
    /// owned by `user_id`.
    async fn reorder(&self, user_id: UserId, orders: &[(LinkId, i32)]) -> RepoResult<()>;
}

// ============================================================================
// View Repository
// ============================================================================

#[async_trait]
pub trait ViewRepository: Send + Sync {
    /// Record a page view
    async fn create(&self, view: &View) -> RepoResult<()>;

    /// Most recent views of a user, newest first
    async fn recent_by_user(&self, user_id: UserId, limit: i64) -> RepoResult<Vec<View>>;
}

// ============================================================================
// Stats Repository
// ============================================================================

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Aggregate platform statistics relative to `now`
    async fn platform_stats(&self, now: DateTime<Utc>) -> RepoResult<PlatformStats>;
}
