//! View database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for views table
#[derive(Debug, Clone, FromRow)]
pub struct ViewModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}
