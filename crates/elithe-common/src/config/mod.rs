//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, CredentialConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
