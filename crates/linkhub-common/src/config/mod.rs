//! Configuration structs

mod app_config;
mod providers;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    PasswordConfig, RateLimitConfig, RedisConfig, ServerConfig, SessionConfig,
};
pub use providers::{AuthProvider, AuthProvidersConfig, OAuthProviderConfig};
