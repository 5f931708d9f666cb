//! Error handling utilities for repositories

use linkhub_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert a SQLx error to a DomainError
///
/// Pool exhaustion and I/O failures mean the database is unreachable; they
/// are kept apart from query failures so callers can answer 503.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match &e {
        SqlxError::RowNotFound => DomainError::RecordNotFound,
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) | SqlxError::Tls(_) => {
            DomainError::DatabaseUnavailable(e.to_string())
        }
        SqlxError::Database(db_err) if db_err.is_unique_violation() => DomainError::UniqueViolation,
        _ => DomainError::DatabaseError(e.to_string()),
    }
}

/// Map a unique violation by constraint name, falling back to `map_db_error`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found() {
        assert!(matches!(
            map_db_error(SqlxError::RowNotFound),
            DomainError::RecordNotFound
        ));
    }

    #[test]
    fn test_pool_failures_are_unavailable() {
        assert!(map_db_error(SqlxError::PoolTimedOut).is_unavailable());
        assert!(map_db_error(SqlxError::PoolClosed).is_unavailable());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(map_db_error(SqlxError::Io(io)).is_unavailable());
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        let err = map_db_error(SqlxError::ColumnNotFound("x".to_string()));
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_unique_fallback() {
        let err = map_unique_violation(SqlxError::PoolTimedOut, |_| DomainError::UsernameTaken);
        assert!(err.is_unavailable());
    }
}
