//! # linkhub-cache
//!
//! Read-through response cache in front of the profile, link list and public
//! page endpoints.
//!
//! ## Features
//!
//! - **Backends**: Redis via a deadpool connection pool, or an in-process
//!   map for tests and single-node runs
//! - **Keys**: typed `resource:identifier` keys with fixed TTLs
//! - **ResponseCache**: JSON get/put/invalidate where every backend failure
//!   degrades to a miss
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use linkhub_cache::{CacheKey, RedisPool, RedisPoolConfig, ResponseCache};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = ResponseCache::new(Arc::new(pool));
//!
//! let key = CacheKey::Links(user_id);
//! if let Some(links) = cache.get::<Vec<LinkResponse>>(&key).await {
//!     return Ok(links);
//! }
//! cache.put(&key, &links).await;
//! cache.invalidate(&[key]).await;
//! ```

pub mod error;
pub mod keys;
pub mod pool;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use keys::{CacheKey, PRIVATE_TTL_SECS, PUBLIC_TTL_SECS};
pub use pool::{CacheBackend, MemoryCache, RedisPool, RedisPoolConfig};
pub use store::{CacheHealth, ResponseCache};
