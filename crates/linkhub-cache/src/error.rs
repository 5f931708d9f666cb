//! Cache error types

/// Error type for cache backend operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create Redis pool: {0}")]
    CreatePool(String),

    #[error("Failed to get connection from pool: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Connection not available")]
    ConnectionNotAvailable,
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
