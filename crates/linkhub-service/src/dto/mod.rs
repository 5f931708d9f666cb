//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

use validator::ValidationErrors;

pub use requests::{
    AdminCreateUserRequest, AdminUpdateUserRequest, CreateLinkRequest, LinkOrder,
    ListUsersParams, LoginRequest, RecordViewRequest, RegisterRequest, ReorderLinksRequest,
    UpdateLinkRequest, UpdateProfileRequest, UpdateThemeRequest,
};

pub use responses::{
    AccountResponse, AdminLinkResponse, AdminUserDetailResponse, AdminUserResponse,
    AdminUserSummary, CountsResponse, CreatedUserResponse, DailyStatResponse, HealthChecks,
    HealthResponse, LinkResponse, LoginResponse, MessageResponse, PageMeta, ProfileResponse,
    PublicLinkResponse, PublicPageResponse, ReadinessResponse, RecentUserResponse,
    StatsOverview, StatsResponse, SuccessResponse, ThemeResponse, TopUserResponse,
    UserListResponse, ViewResponse,
};

/// First human-readable message out of a validation failure
#[must_use]
pub fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid request".to_string())
}
