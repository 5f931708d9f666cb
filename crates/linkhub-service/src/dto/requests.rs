//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. Checks run at
//! struct level so the first failing rule decides the message, matching
//! what clients display verbatim.

use std::borrow::Cow;

use linkhub_core::{is_valid_email, is_valid_url, is_valid_username, Role, Theme};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Distinguish an absent field from an explicit `null`
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Credentials sign-up request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_register"))]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

fn validate_new_account(
    email: Option<&str>,
    password: Option<&str>,
    name: Option<&str>,
    username: Option<&str>,
) -> Result<(), ValidationError> {
    if is_blank(email) || password.is_none_or(str::is_empty) || is_blank(name) || is_blank(username)
    {
        return Err(invalid("required", "All fields are required"));
    }
    if !email.is_some_and(is_valid_email) {
        return Err(invalid("email", "Invalid email format"));
    }
    if !username.is_some_and(is_valid_username) {
        return Err(invalid(
            "username",
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}

fn validate_register(req: &RegisterRequest) -> Result<(), ValidationError> {
    validate_new_account(
        req.email.as_deref(),
        req.password.as_deref(),
        req.name.as_deref(),
        req.username.as_deref(),
    )
}

/// Credentials sign-in request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_login"))]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn validate_login(req: &LoginRequest) -> Result<(), ValidationError> {
    if is_blank(req.email.as_deref()) || req.password.as_deref().is_none_or(str::is_empty) {
        return Err(invalid("required", "Email and password are required"));
    }
    Ok(())
}

// ============================================================================
// Link Requests
// ============================================================================

fn validate_title_and_url(title: Option<&str>, url: Option<&str>) -> Result<(), ValidationError> {
    if is_blank(title) || is_blank(url) {
        return Err(invalid("required", "Title and URL are required"));
    }
    if !url.is_some_and(is_valid_url) {
        return Err(invalid("url", "Invalid URL format"));
    }
    Ok(())
}

/// Create link request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_link"))]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Defaults to active
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn validate_create_link(req: &CreateLinkRequest) -> Result<(), ValidationError> {
    validate_title_and_url(req.title.as_deref(), req.url.as_deref())
}

/// Update link request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_link"))]
pub struct UpdateLinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Left unchanged when absent
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn validate_update_link(req: &UpdateLinkRequest) -> Result<(), ValidationError> {
    validate_title_and_url(req.title.as_deref(), req.url.as_deref())
}

/// One `(id, order)` pair of a reorder request
#[derive(Debug, Clone, Deserialize)]
pub struct LinkOrder {
    pub id: String,
    pub order: i32,
}

/// Bulk reorder request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_reorder"))]
pub struct ReorderLinksRequest {
    #[serde(default)]
    pub links: Option<Vec<LinkOrder>>,
}

fn validate_reorder(req: &ReorderLinksRequest) -> Result<(), ValidationError> {
    if req.links.is_none() {
        return Err(invalid("required", "Links array is required"));
    }
    Ok(())
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_profile"))]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// `null` clears the bio
    #[serde(default, deserialize_with = "deserialize_some")]
    pub bio: Option<Option<String>>,
    /// `null` clears the avatar
    #[serde(default, deserialize_with = "deserialize_some")]
    pub avatar: Option<Option<String>>,
}

fn validate_username_field(username: Option<&str>) -> Result<(), ValidationError> {
    match username {
        Some(username) if !username.is_empty() && !is_valid_username(username) => Err(invalid(
            "username",
            "Username can only contain letters, numbers, and underscores",
        )),
        _ => Ok(()),
    }
}

fn validate_update_profile(req: &UpdateProfileRequest) -> Result<(), ValidationError> {
    validate_username_field(req.username.as_deref())
}

/// Theme change request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_theme"))]
pub struct UpdateThemeRequest {
    #[serde(default)]
    pub theme: Option<String>,
}

impl UpdateThemeRequest {
    /// The parsed theme, once validated
    #[must_use]
    pub fn parsed(&self) -> Option<Theme> {
        self.theme.as_deref().and_then(|t| t.parse().ok())
    }
}

fn validate_theme(req: &UpdateThemeRequest) -> Result<(), ValidationError> {
    if req.parsed().is_none() {
        return Err(invalid("theme", "Invalid theme"));
    }
    Ok(())
}

// ============================================================================
// View Requests
// ============================================================================

/// Page view payload; both fields are optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordViewRequest {
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referer: Option<String>,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Admin user creation; like sign-up plus role and active flag
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_admin_create"))]
pub struct AdminCreateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn validate_admin_create(req: &AdminCreateUserRequest) -> Result<(), ValidationError> {
    validate_new_account(
        req.email.as_deref(),
        req.password.as_deref(),
        req.name.as_deref(),
        req.username.as_deref(),
    )
}

/// Admin partial update of any user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_admin_update"))]
pub struct AdminUpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub avatar: Option<Option<String>>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn validate_admin_update(req: &AdminUpdateUserRequest) -> Result<(), ValidationError> {
    validate_username_field(req.username.as_deref())
}

/// Admin user listing query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
