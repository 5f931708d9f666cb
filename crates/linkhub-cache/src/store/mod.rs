//! Typed cache stores

mod response_cache;

pub use response_cache::{CacheHealth, ResponseCache};
