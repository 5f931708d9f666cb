//! PostgreSQL implementation of StatsRepository

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;

use linkhub_core::entities::{DailyCount, PlatformStats, User, UserWithCounts};
use linkhub_core::traits::{RepoResult, StatsRepository};

use crate::models::{DailyCountModel, TotalsModel, UserModel, UserWithCountsModel};

use super::error::map_db_error;
use super::user::USER_WITH_COUNTS_COLUMNS;

/// PostgreSQL implementation of StatsRepository
#[derive(Clone)]
pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    /// Create a new PgStatsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn totals(&self, now: DateTime<Utc>) -> RepoResult<TotalsModel> {
        let window = Duration::days(PlatformStats::ACTIVE_WINDOW_DAYS);

        sqlx::query_as::<_, TotalsModel>(
            r"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE is_active AND updated_at >= $1) AS active_users,
                (SELECT COUNT(*) FROM links) AS total_links,
                (SELECT COUNT(*) FROM views) AS total_views,
                (SELECT COUNT(*) FROM users WHERE created_at >= $1) AS users_last_30d,
                (SELECT COUNT(*) FROM users WHERE created_at >= $2 AND created_at < $1) AS users_prev_30d
            ",
        )
        .bind(now - window)
        .bind(now - window * 2)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn recent_users(&self, now: DateTime<Utc>) -> RepoResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, name, username, bio, avatar, theme, role, is_active,
                   created_at, updated_at
            FROM users
            WHERE created_at >= $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(now - Duration::days(PlatformStats::RECENT_WINDOW_DAYS))
        .bind(PlatformStats::LEADERBOARD_SIZE)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn top_users(&self) -> RepoResult<Vec<UserWithCounts>> {
        let sql = format!(
            "SELECT {USER_WITH_COUNTS_COLUMNS} FROM users u \
             ORDER BY link_count DESC, u.created_at ASC LIMIT $1"
        );
        let rows = sqlx::query_as::<_, UserWithCountsModel>(&sql)
            .bind(PlatformStats::LEADERBOARD_SIZE)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(UserWithCounts::try_from).collect()
    }

    async fn daily_signups(&self, now: DateTime<Utc>) -> RepoResult<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyCountModel>(
            r"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count
            FROM users
            WHERE created_at >= $1
            GROUP BY day
            ORDER BY day ASC
            ",
        )
        .bind(now - Duration::days(PlatformStats::ACTIVE_WINDOW_DAYS))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| DailyCount {
                date: row.day,
                count: row.count,
            })
            .collect())
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    #[instrument(skip(self))]
    async fn platform_stats(&self, now: DateTime<Utc>) -> RepoResult<PlatformStats> {
        let totals = self.totals(now).await?;
        let recent_users = self.recent_users(now).await?;
        let top_users = self.top_users().await?;
        let daily_signups = self.daily_signups(now).await?;

        Ok(PlatformStats {
            total_users: totals.total_users,
            active_users: totals.active_users,
            total_links: totals.total_links,
            total_views: totals.total_views,
            users_last_30d: totals.users_last_30d,
            users_prev_30d: totals.users_prev_30d,
            recent_users,
            top_users,
            daily_signups,
            generated_at: now,
        })
    }
}
