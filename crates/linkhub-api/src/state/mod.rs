//! Application state
//!
//! Holds the shared state for the Axum application: the service context
//! and the session cookie settings.

use std::sync::Arc;

use linkhub_common::{AppConfig, JwtService};
use linkhub_service::ServiceContext;

/// Session cookie attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    /// Set the `Secure` attribute (production only)
    pub secure: bool,
}

impl SessionCookie {
    /// Default cookie name
    pub const DEFAULT_NAME: &'static str = "linkhub_session";
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            secure: false,
        }
    }
}

impl From<&AppConfig> for SessionCookie {
    fn from(config: &AppConfig) -> Self {
        Self {
            name: config.session.cookie_name.clone(),
            secure: config.app.env.is_production(),
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    cookie: Arc<SessionCookie>,
}

impl AppState {
    /// Create a new AppState from an owned or shared service context
    pub fn new(service_context: impl Into<Arc<ServiceContext>>, cookie: SessionCookie) -> Self {
        Self {
            service_context: service_context.into(),
            cookie: Arc::new(cookie),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Session cookie settings
    pub fn cookie(&self) -> &SessionCookie {
        &self.cookie
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("cookie", &self.cookie)
            .finish()
    }
}
