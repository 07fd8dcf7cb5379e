//! # elithe-common
//!
//! Shared utilities including configuration, error handling, identity
//! verification, credential rendering and telemetry.

pub mod auth;
pub mod config;
pub mod credential;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, CredentialConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
pub use credential::{png_data_url, QrCredentialIssuer};
pub use error::{AppError, ErrorResponse};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError,
};
