//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use linkhub_core::entities::{User, UserCounts, UserPage, UserQuery, UserWithCounts};
use linkhub_core::error::DomainError;
use linkhub_core::traits::{RepoResult, UserRepository};
use linkhub_core::value_objects::UserId;

use crate::models::{UserModel, UserWithCountsModel};

use super::error::{map_db_error, map_unique_violation};

const USER_COLUMNS: &str =
    "u.id, u.email, u.name, u.username, u.bio, u.avatar, u.theme, u.role, u.is_active, \
     u.created_at, u.updated_at";

/// Select list for users joined with their link and view counts
pub(crate) const USER_WITH_COUNTS_COLUMNS: &str =
    "u.id, u.email, u.name, u.username, u.bio, u.avatar, u.theme, u.role, u.is_active, \
     u.created_at, u.updated_at, \
     (SELECT COUNT(*) FROM links l WHERE l.user_id = u.id) AS link_count, \
     (SELECT COUNT(*) FROM views v WHERE v.user_id = u.id) AS view_count";

/// Map a unique violation on the users table to the field that collided
fn user_conflict(constraint: Option<&str>, on_username: DomainError) -> DomainError {
    match constraint {
        Some("users_email_key") => DomainError::EmailAlreadyExists,
        Some("users_username_key") => on_username,
        _ => DomainError::UniqueViolation,
    }
}

/// Append the role/status/search filters of `query`
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &UserQuery) {
    qb.push(" WHERE TRUE");

    if let Some(role) = query.role {
        qb.push(" AND u.role = ");
        qb.push_bind(role.as_str());
    }

    if let Some(status) = query.status {
        qb.push(" AND u.is_active = ");
        qb.push_bind(status.matches(true));
    }

    if let Some(term) = query.search_term() {
        let pattern = format!("%{term}%");
        qb.push(" AND (u.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.email ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.username ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.{column} = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("email", email).await
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.find_one("username", username).await
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn username_taken(&self, username: &str, exclude: Option<UserId>) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            ",
        )
        .bind(username)
        .bind(exclude.map(UserId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, name, username, bio, avatar, theme, role,
                               is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.bio)
        .bind(&user.avatar)
        .bind(user.theme.as_str())
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                user_conflict(constraint, DomainError::UsernameAlreadyExists)
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET email = $2, name = $3, username = $4, bio = $5, avatar = $6, theme = $7,
                role = $8, is_active = $9, updated_at = $10
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.username)
        .bind(&user.bio)
        .bind(&user.avatar)
        .bind(user.theme.as_str())
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                user_conflict(constraint, DomainError::UsernameTaken)
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: UserId) -> RepoResult<()> {
        // links and views go with the row (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &UserQuery) -> RepoResult<UserPage> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users u");
        push_filters(&mut count_qb, query);
        let total = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {USER_WITH_COUNTS_COLUMNS} FROM users u"
        ));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY u.created_at DESC, u.id DESC LIMIT ");
        qb.push_bind(i64::from(query.limit));
        qb.push(" OFFSET ");
        qb.push_bind(query.offset());

        let rows = qb
            .build_query_as::<UserWithCountsModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let users = rows
            .into_iter()
            .map(UserWithCounts::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(UserPage { users, total })
    }

    #[instrument(skip(self))]
    async fn counts(&self, id: UserId) -> RepoResult<UserCounts> {
        let (links, views) = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT
                (SELECT COUNT(*) FROM links WHERE user_id = $1),
                (SELECT COUNT(*) FROM views WHERE user_id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(UserCounts { links, views })
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_db_error)
    }
}
