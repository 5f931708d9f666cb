//! Aggregate rows for platform statistics

use chrono::NaiveDate;
use sqlx::FromRow;

/// Platform-wide counters computed in one round-trip
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TotalsModel {
    pub total_users: i64,
    pub active_users: i64,
    pub total_links: i64,
    pub total_views: i64,
    pub users_last_30d: i64,
    pub users_prev_30d: i64,
}

/// Signups grouped by UTC day
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DailyCountModel {
    pub day: NaiveDate,
    pub count: i64,
}
