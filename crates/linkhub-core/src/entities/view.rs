//! View entity - one recorded visit to a public page

use chrono::{DateTime, Utc};

use crate::value_objects::{UserId, ViewId};

/// Append-only page view record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub id: ViewId,
    pub user_id: UserId,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

impl View {
    pub fn new(
        user_id: UserId,
        user_agent: Option<String>,
        referer: Option<String>,
        ip_address: String,
    ) -> Self {
        Self {
            id: ViewId::new(),
            user_id,
            user_agent,
            referer,
            ip_address,
            created_at: Utc::now(),
        }
    }
}
