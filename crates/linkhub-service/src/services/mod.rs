//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` and orchestrates
//! validation, persistence and cache invalidation for one area.

pub mod admin;
pub mod auth;
pub mod context;
pub mod error;
pub mod health;
pub mod link;
pub mod profile;
pub mod public;

// Re-export all services for convenience
pub use admin::AdminService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use link::LinkService;
pub use profile::ProfileService;
pub use public::{PublicService, ViewerInfo};
