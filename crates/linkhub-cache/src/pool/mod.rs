//! Cache backends
//!
//! `CacheBackend` abstracts the key-value store; Redis is the production
//! implementation and `MemoryCache` serves tests.

mod backend;
mod memory;
mod redis_pool;

pub use backend::CacheBackend;
pub use memory::MemoryCache;
pub use redis_pool::{RedisPool, RedisPoolConfig};
