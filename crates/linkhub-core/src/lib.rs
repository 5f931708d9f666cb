//! # linkhub-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    DailyCount, Link, PlatformStats, User, UserCounts, UserPage, UserQuery, UserStatusFilter,
    UserWithCounts, View,
};
pub use error::DomainError;
pub use traits::{LinkRepository, RepoResult, StatsRepository, UserRepository, ViewRepository};
pub use value_objects::{
    is_valid_email, is_valid_url, is_valid_username, IdParseError, LinkId, Role, RoleParseError,
    Theme, ThemeParseError, UserId, ViewId,
};
