//! PostgreSQL implementation of LinkRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use linkhub_core::entities::Link;
use linkhub_core::error::DomainError;
use linkhub_core::traits::{LinkRepository, RepoResult};
use linkhub_core::value_objects::{LinkId, UserId};

use crate::models::LinkModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LinkRepository
#[derive(Clone)]
pub struct PgLinkRepository {
    pool: PgPool,
}

impl PgLinkRepository {
    /// Create a new PgLinkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Link>> {
        let rows = sqlx::query_as::<_, LinkModel>(
            r#"
            SELECT id, user_id, title, url, "order", is_active, created_at, updated_at
            FROM links
            WHERE user_id = $1
            ORDER BY "order" ASC, created_at ASC, id ASC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active_by_user(&self, user_id: UserId) -> RepoResult<Vec<Link>> {
        let rows = sqlx::query_as::<_, LinkModel>(
            r#"
            SELECT id, user_id, title, url, "order", is_active, created_at, updated_at
            FROM links
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY "order" ASC, created_at ASC, id ASC
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_owned(&self, id: LinkId, user_id: UserId) -> RepoResult<Option<Link>> {
        let row = sqlx::query_as::<_, LinkModel>(
            r#"
            SELECT id, user_id, title, url, "order", is_active, created_at, updated_at
            FROM links
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(Link::from))
    }

    #[instrument(skip(self))]
    async fn max_order(&self, user_id: UserId) -> RepoResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(r#"SELECT MAX("order") FROM links WHERE user_id = $1"#)
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, link), fields(link_id = %link.id, user_id = %link.user_id))]
    async fn create(&self, link: &Link) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO links (id, user_id, title, url, "order", is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(link.id.into_inner())
        .bind(link.user_id.into_inner())
        .bind(&link.title)
        .bind(&link.url)
        .bind(link.order)
        .bind(link.is_active)
        .bind(link.created_at)
        .bind(link.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, link), fields(link_id = %link.id, user_id = %link.user_id))]
    async fn update(&self, link: &Link) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET title = $3, url = $4, "order" = $5, is_active = $6, updated_at = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(link.id.into_inner())
        .bind(link.user_id.into_inner())
        .bind(&link.title)
        .bind(&link.url)
        .bind(link.order)
        .bind(link.is_active)
        .bind(link.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LinkNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: LinkId, user_id: UserId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LinkNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self, orders), fields(count = orders.len()))]
    async fn reorder(&self, user_id: UserId, orders: &[(LinkId, i32)]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (link_id, order) in orders {
            let result = sqlx::query(
                r#"
                UPDATE links
                SET "order" = $3, updated_at = NOW()
                WHERE id = $1 AND user_id = $2
                "#,
            )
            .bind(link_id.into_inner())
            .bind(user_id.into_inner())
            .bind(order)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                warn!(%link_id, "Reorder references a link the caller does not own");
                tx.rollback().await.map_err(map_db_error)?;
                return Err(DomainError::LinkNotFound);
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
