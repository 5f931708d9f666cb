//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use linkhub_cache::{RedisPool, ResponseCache};
use linkhub_common::{AppConfig, AppError, JwtService, PasswordService};
use linkhub_db::{
    create_pool, run_migrations, PgLinkRepository, PgStatsRepository, PgUserRepository,
    PgViewRepository, PoolConfig,
};
use linkhub_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::{AppState, SessionCookie};

/// Build the application with the base middleware stack
///
/// No rate limiting or CORS; used by tests and embedders.
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    apply_middleware(router).with_state(state)
}

/// Build the application as served: CORS and rate limiting on the API
/// routes, health routes exempt
pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Result<Router, AppError> {
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = api.merge(health_routes());
    Ok(apply_middleware(router).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    // Response cache; Redis is optional
    let cache = match &config.redis {
        Some(redis) => {
            let redis_pool =
                RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Response cache enabled");
            ResponseCache::new(Arc::new(redis_pool))
        }
        None => {
            warn!("REDIS_URL not set, response cache disabled");
            ResponseCache::disabled()
        }
    };

    let jwt_service = Arc::new(JwtService::new(
        &config.session.secret,
        config.session.ttl_seconds,
    ));
    let password_service = PasswordService::new(config.password)?;

    // Build service context
    let service_context = ServiceContext::builder()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .link_repo(Arc::new(PgLinkRepository::new(pool.clone())))
        .view_repo(Arc::new(PgViewRepository::new(pool.clone())))
        .stats_repo(Arc::new(PgStatsRepository::new(pool)))
        .cache(cache)
        .jwt_service(jwt_service)
        .password_service(password_service)
        .auth_providers(config.auth_providers.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, SessionCookie::from(config)))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(&config).await?;

    // Build application
    let app = create_app_with_config(state, &config)?;

    // Run server
    run_server(app, &addr).await
}
