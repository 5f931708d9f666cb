//! Cache backend trait

use async_trait::async_trait;

use crate::error::CacheResult;

/// String key-value store with per-entry TTL
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Get a raw value
    async fn get_raw(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store a raw value that expires after `ttl_seconds`
    async fn set_raw(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Delete keys, returning how many existed
    async fn delete(&self, keys: &[String]) -> CacheResult<u64>;

    /// Round-trip to the store
    async fn ping(&self) -> CacheResult<()>;
}
