//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. The database
//! outlives a test run, so generated names carry a per-process prefix.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

static RUN_ID: OnceLock<String> = OnceLock::new();

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    let run = RUN_ID.get_or_init(|| uuid::Uuid::new_v4().simple().to_string()[..8].to_string());
    format!("{run}_{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("test{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            name: format!("Test User {suffix}"),
            username: format!("user_{suffix}"),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Account as returned by registration and sign-in
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}

/// Registration response
#[derive(Debug, Deserialize)]
pub struct CreatedUserResponse {
    pub message: String,
    pub user: AccountResponse,
}

/// Sign-in response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: AccountResponse,
}

/// Create or update link request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl LinkRequest {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            is_active: None,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = Some(false);
        self
    }
}

/// Owner's view of a link
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub order: i32,
    pub is_active: bool,
}

/// One entry of a reorder request
#[derive(Debug, Serialize)]
pub struct LinkOrder {
    pub id: String,
    pub order: i32,
}

/// Reorder request
#[derive(Debug, Serialize)]
pub struct ReorderRequest {
    pub links: Vec<LinkOrder>,
}

impl ReorderRequest {
    /// Assign orders 0.. in the given sequence
    pub fn sequence(ids: &[&str]) -> Self {
        Self {
            links: ids
                .iter()
                .zip(0..)
                .map(|(id, order)| LinkOrder {
                    id: (*id).to_string(),
                    order,
                })
                .collect(),
        }
    }
}

/// Profile as returned to its owner
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: String,
}

/// Link shown on a public page
#[derive(Debug, Deserialize)]
pub struct PublicLinkResponse {
    pub id: String,
    pub title: String,
    pub url: String,
    pub order: i32,
}

/// Public page
#[derive(Debug, Deserialize)]
pub struct PublicPageResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: String,
    pub links: Vec<PublicLinkResponse>,
}

/// Pagination block of the admin user list
#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

/// Link and view counts
#[derive(Debug, Deserialize)]
pub struct CountsResponse {
    pub links: i64,
    pub views: i64,
}

/// Row of the admin user list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
    pub id: String,
    pub username: String,
    pub role: String,
    pub is_active: bool,
    #[serde(rename = "_count")]
    pub count: CountsResponse,
}

/// Admin user list
#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<AdminUserSummary>,
    pub pagination: PageMeta,
}

/// Error body shared by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
