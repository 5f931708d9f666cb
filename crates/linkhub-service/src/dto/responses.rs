//! Response DTOs for API endpoints
//!
//! Field names are camelCase on the wire. Projections that are cached also
//! derive `Deserialize` so a cache hit round-trips to the same body.

use chrono::{DateTime, NaiveDate, Utc};
use linkhub_core::{Role, Theme};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common Response Types
// ============================================================================

/// `{success: true}` acknowledgement
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{message}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Owned link and view counts, serialized as `_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsResponse {
    pub links: i64,
    pub views: i64,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Account summary returned after sign-up, sign-in and admin creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Sign-up / admin creation response
#[derive(Debug, Clone, Serialize)]
pub struct CreatedUserResponse {
    pub message: String,
    pub user: AccountResponse,
}

impl CreatedUserResponse {
    #[must_use]
    pub fn new(user: AccountResponse) -> Self {
        Self {
            message: "User created successfully".to_string(),
            user,
        }
    }
}

/// Sign-in response; the token is also set as the session cookie
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: AccountResponse,
}

// ============================================================================
// Link Responses
// ============================================================================

/// Owner view of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Profile Responses
// ============================================================================

/// Owner view of the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Theme,
}

/// Current theme
#[derive(Debug, Clone, Serialize)]
pub struct ThemeResponse {
    pub id: String,
    pub theme: Theme,
}

// ============================================================================
// Public Responses
// ============================================================================

/// Link as shown on the public page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicLinkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub order: i32,
}

/// Public page: profile plus active links in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPageResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Theme,
    pub links: Vec<PublicLinkResponse>,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// Row of the admin user listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_count")]
    pub count: CountsResponse,
}

/// Page-number pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

impl PageMeta {
    #[must_use]
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let limit_i64 = i64::from(limit.max(1));
        Self {
            page,
            limit,
            total,
            pages: (total + limit_i64 - 1) / limit_i64,
        }
    }
}

/// Admin user listing
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<AdminUserSummary>,
    pub pagination: PageMeta,
}

/// Full user record as seen by an admin
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Theme,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_count")]
    pub count: CountsResponse,
}

/// Link as listed in the admin user detail
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLinkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Recorded page view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub id: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

/// Admin user detail with links and the latest views
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserDetailResponse {
    #[serde(flatten)]
    pub user: AdminUserResponse,
    pub links: Vec<AdminLinkResponse>,
    pub views: Vec<ViewResponse>,
}

/// Headline platform numbers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub total_users: i64,
    pub active_users: i64,
    pub total_links: i64,
    pub total_views: i64,
    pub user_growth_rate: f64,
}

/// Recently registered user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Leaderboard entry
#[derive(Debug, Clone, Serialize)]
pub struct TopUserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(rename = "_count")]
    pub count: CountsResponse,
}

/// Signups on one day
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyStatResponse {
    pub date: NaiveDate,
    pub count: i64,
}

/// Platform statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub overview: StatsOverview,
    pub recent_users: Vec<RecentUserResponse>,
    pub top_users: Vec<TopUserResponse>,
    pub daily_stats: Vec<DailyStatResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Per-dependency readiness
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: &'static str,
    pub cache: &'static str,
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
    pub timestamp: DateTime<Utc>,
}

impl ReadinessResponse {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
