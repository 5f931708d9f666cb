//! Middleware stack for the API server
//!
//! Provides request ids, tracing spans, timeouts, compression, CORS and
//! rate limiting.

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use linkhub_common::{AppError, CorsConfig, RateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request time budget
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn http_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Apply the base middleware stack: request id, tracing, timeout and
/// compression
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            // Request ID
            .layer(SetRequestIdLayer::new(
                header::HeaderName::from_static(REQUEST_ID_HEADER),
                MakeRequestUuid,
            ))
            .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
                REQUEST_ID_HEADER,
            )))
            // Tracing
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(http_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            // Timeout (returns 503 Service Unavailable on timeout)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            ))
            .layer(CompressionLayer::new()),
    )
}

/// Apply configured CORS and rate limiting to the API routes
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Result<Router<AppState>, AppError> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(replenish_period(rate_limit_config.requests_per_second)?)
            .burst_size(rate_limit_config.burst)
            // Global (not per-IP) limit, so no connect info is needed
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .ok_or_else(|| AppError::Config("Invalid rate limit configuration".to_string()))?,
    );

    Ok(router
        // CORS (innermost)
        .layer(create_cors_layer_from_config(cors_config, is_production))
        // Rate limiting
        .layer(GovernorLayer {
            config: governor_conf,
        }))
}

/// Time between quota refills for a rate of `requests_per_second`
fn replenish_period(requests_per_second: u32) -> Result<Duration, AppError> {
    if requests_per_second == 0 {
        return Err(AppError::Config(
            "RATE_LIMIT_REQUESTS_PER_SECOND must be at least 1".to_string(),
        ));
    }
    Ok(Duration::from_secs(1) / requests_per_second)
}

/// Parse configured origins, dropping entries that are not valid header
/// values
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// CORS for the API routes
///
/// Configured origins are allowed with credentials so the session cookie
/// travels. Without configured origins, development allows any origin and
/// production allows none.
fn create_cors_layer_from_config(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id]);

    let origins = parse_origins(&config.allowed_origins);
    match (origins.is_empty(), is_production) {
        (false, _) => {
            tracing::info!(count = origins.len(), "CORS restricted to configured origins");
            layer
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
        }
        (true, true) => {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS is empty in production; cross-origin requests are refused"
            );
            layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
        (true, false) => {
            tracing::warn!("CORS allows any origin (development)");
            layer.allow_origin(Any)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_invalid() {
        let origins = parse_origins(&[
            "https://app.example.com".to_string(),
            "bad\norigin".to_string(),
        ]);
        assert_eq!(origins, vec![HeaderValue::from_static("https://app.example.com")]);
    }

    #[test]
    fn test_replenish_period_is_inverse_of_rate() {
        assert_eq!(replenish_period(1).unwrap(), Duration::from_secs(1));
        assert_eq!(replenish_period(10).unwrap(), Duration::from_millis(100));
        assert_eq!(replenish_period(4000).unwrap(), Duration::from_micros(250));
        assert!(replenish_period(0).is_err());
    }

    #[test]
    fn test_rate_limit_layer_builds() {
        let router = Router::new();
        let config = RateLimitConfig {
            requests_per_second: 10,
            burst: 20,
        };
        let result = apply_middleware_with_config(router, &config, &CorsConfig::default(), false);
        assert!(result.is_ok());
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let config = RateLimitConfig {
            requests_per_second: 0,
            burst: 20,
        };
        let result =
            apply_middleware_with_config(Router::new(), &config, &CorsConfig::default(), false);
        assert!(result.is_err());
    }
}
