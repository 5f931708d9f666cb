//! # linkhub-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every read of a cached projection goes through the `ResponseCache`
//! first; every write persists, then invalidates the affected keys.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    AdminService, AuthService, HealthService, LinkService, ProfileService, PublicService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, ViewerInfo,
};
