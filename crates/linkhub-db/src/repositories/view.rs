//! PostgreSQL implementation of ViewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use linkhub_core::entities::View;
use linkhub_core::traits::{RepoResult, ViewRepository};
use linkhub_core::value_objects::UserId;

use crate::models::ViewModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ViewRepository
#[derive(Clone)]
pub struct PgViewRepository {
    pool: PgPool,
}

impl PgViewRepository {
    /// Create a new PgViewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewRepository for PgViewRepository {
    #[instrument(skip(self, view), fields(user_id = %view.user_id))]
    async fn create(&self, view: &View) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO views (id, user_id, user_agent, referer, ip_address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(view.id.into_inner())
        .bind(view.user_id.into_inner())
        .bind(&view.user_agent)
        .bind(&view.referer)
        .bind(&view.ip_address)
        .bind(view.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn recent_by_user(&self, user_id: UserId, limit: i64) -> RepoResult<Vec<View>> {
        let rows = sqlx::query_as::<_, ViewModel>(
            r"
            SELECT id, user_id, user_agent, referer, ip_address, created_at
            FROM views
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(View::from).collect())
    }
}
