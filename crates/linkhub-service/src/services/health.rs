//! Health service
//!
//! Liveness never touches a dependency. Readiness requires the database;
//! the cache is reported but optional.

use chrono::Utc;
use linkhub_cache::CacheHealth;
use tracing::{instrument, warn};

use crate::dto::{HealthChecks, HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    /// Create a new HealthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Process is up
    #[must_use]
    pub fn liveness(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy",
            timestamp: Utc::now(),
        }
    }

    /// Dependency check
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.user_repo().ping().await {
            Ok(()) => "healthy",
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                "unhealthy"
            }
        };
        let cache: CacheHealth = self.ctx.cache().health().await;

        ReadinessResponse {
            status: if database == "healthy" { "ready" } else { "not_ready" },
            checks: HealthChecks {
                database,
                cache: cache.as_str(),
            },
            timestamp: Utc::now(),
        }
    }
}
