//! In-process cache backend
//!
//! Expiry is checked on read. Call counters and an outage switch let tests
//! observe cache traffic and simulate a failing store.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::backend::CacheBackend;
use crate::error::{CacheError, CacheResult};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// DashMap-backed cache with TTL expiry
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    unavailable: AtomicBool,
    gets: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the store were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `get_raw` calls so far
    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set_raw` calls so far
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Number of `delete` calls so far
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Total calls of any kind
    pub fn total_calls(&self) -> usize {
        self.get_calls() + self.set_calls() + self.delete_calls()
    }

    /// Whether a live entry exists, without counting as a read
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    fn check_available(&self) -> CacheResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(CacheError::ConnectionNotAvailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get_raw(&self, key: &str) -> CacheResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let now = Instant::now();
        let value = self
            .entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone());

        if value.is_none() {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<u64> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let removed = keys
            .iter()
            .filter(|key| self.entries.remove(key.as_str()).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check_available()
    }
}
