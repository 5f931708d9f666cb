//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for users table (without the password hash)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub username: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row joined with owned-record counts
#[derive(Debug, Clone, FromRow)]
pub struct UserWithCountsModel {
    #[sqlx(flatten)]
    pub user: UserModel,
    pub link_count: i64,
    pub view_count: i64,
}
