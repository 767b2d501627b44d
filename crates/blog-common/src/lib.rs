//! # blog-common
//!
//! Shared utilities including configuration, error handling, session tokens,
//! password hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_password, hash_password, validate_password_length, verify_password, Claims,
    JwtService, PasswordService, MIN_PASSWORD_LENGTH,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig, SessionConfig, StaticConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
