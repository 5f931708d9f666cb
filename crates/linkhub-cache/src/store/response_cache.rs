//! JSON response cache
//!
//! Read-through/write-invalidate helper used by the services. A cache outage
//! must never fail a request: every backend or decode error is logged with
//! `warn!` and treated as a miss (reads) or a no-op (writes, deletes).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::keys::CacheKey;
use crate::pool::CacheBackend;

/// Cache reachability as reported by readiness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheHealth {
    Healthy,
    Unhealthy,
    Disabled,
}

impl CacheHealth {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Disabled => "disabled",
        }
    }
}

/// Response cache over an optional backend
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    backend: Option<Arc<dyn CacheBackend>>,
}

impl ResponseCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A cache where every lookup misses and every write is dropped
    #[must_use]
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Look up and decode a cached value
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let backend = self.backend.as_ref()?;
        let key_str = key.to_string();

        let raw = match backend.get_raw(&key_str).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key_str, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key_str, error = %e, "Cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key_str, "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key = %key_str, error = %e, "Cached value could not be decoded");
                None
            }
        }
    }

    /// Encode and store a value with the key's TTL
    pub async fn put<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        let key_str = key.to_string();

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key_str, error = %e, "Value could not be encoded for cache");
                return;
            }
        };

        if let Err(e) = backend.set_raw(&key_str, &raw, key.ttl_secs()).await {
            warn!(key = %key_str, error = %e, "Cache write failed");
        }
    }

    /// Delete stale keys
    pub async fn invalidate(&self, keys: &[CacheKey]) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if keys.is_empty() {
            return;
        }

        let keys: Vec<String> = keys.iter().map(ToString::to_string).collect();
        match backend.delete(&keys).await {
            Ok(deleted) => debug!(?keys, deleted, "Cache invalidated"),
            Err(e) => warn!(?keys, error = %e, "Cache invalidation failed"),
        }
    }

    /// Ping the backend
    pub async fn health(&self) -> CacheHealth {
        match self.backend.as_ref() {
            None => CacheHealth::Disabled,
            Some(backend) => match backend.ping().await {
                Ok(()) => CacheHealth::Healthy,
                Err(e) => {
                    warn!(error = %e, "Cache health check failed");
                    CacheHealth::Unhealthy
                }
            },
        }
    }
}
