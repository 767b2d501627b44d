//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub static_files: StaticConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations at startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds; `None` keeps sessions valid until signout
    #[serde(default)]
    pub session_expiry: Option<i64>,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the cookie `Secure`
    #[serde(default)]
    pub secure: bool,
}

/// Highest sustained rate the limiter can express at millisecond resolution
pub const MAX_REQUESTS_PER_SECOND: u32 = 1000;

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Sustained rate, shared by all clients
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    /// Requests admitted at once before the sustained rate applies
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl RateLimitConfig {
    /// Milliseconds between two replenished tokens
    pub fn replenish_period_ms(&self) -> u64 {
        let rate = self.requests_per_second.clamp(1, MAX_REQUESTS_PER_SECOND);
        u64::from(1000 / rate)
    }

    /// Reject settings the limiter cannot honor
    ///
    /// # Errors
    /// Returns `InvalidValue` for a rate outside `1..=1000` or a zero burst
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_REQUESTS_PER_SECOND).contains(&self.requests_per_second) {
            return Err(ConfigError::InvalidValue(
                "RATE_LIMIT_REQUESTS_PER_SECOND",
                self.requests_per_second.to_string(),
            ));
        }
        if self.burst == 0 {
            return Err(ConfigError::InvalidValue("RATE_LIMIT_BURST", "0".to_string()));
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Built client bundle served alongside the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    pub dir: Option<String>,
}

// Default value functions
fn default_app_name() -> String {
    "blog-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_cookie_name() -> String {
    "access_token".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

/// Read and parse an optional variable; unparsable values are reported
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

fn parse_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue(name, raw)),
        },
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Development defaults around a database URL and session secret
    #[must_use]
    pub fn with_defaults(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            api: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                run_migrations: default_true(),
            },
            jwt: JwtConfig {
                secret: jwt_secret.into(),
                session_expiry: None,
            },
            session: SessionConfig {
                cookie_name: default_cookie_name(),
                secure: false,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: default_requests_per_second(),
                burst: default_burst(),
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            static_files: StaticConfig::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_kind = match env::var("APP_ENV") {
            Ok(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            Err(_) => Environment::default(),
        };

        let port = match parse_var::<u16>("API_PORT")? {
            Some(port) => port,
            None => parse_var("PORT")?.unwrap_or_else(default_port),
        };

        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET", "empty".to_string()));
        }

        let session_expiry = parse_var::<i64>("JWT_SESSION_EXPIRY")?;
        if let Some(expiry) = session_expiry.filter(|e| *e <= 0) {
            return Err(ConfigError::InvalidValue(
                "JWT_SESSION_EXPIRY",
                expiry.to_string(),
            ));
        }

        let rate_limit = RateLimitConfig {
            requests_per_second: parse_var("RATE_LIMIT_REQUESTS_PER_SECOND")?
                .unwrap_or_else(default_requests_per_second),
            burst: parse_var("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
        };
        rate_limit.validate()?;

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env_kind,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                run_migrations: parse_bool("RUN_MIGRATIONS")?.unwrap_or_else(default_true),
            },
            jwt: JwtConfig {
                secret,
                session_expiry,
            },
            session: SessionConfig {
                cookie_name: default_cookie_name(),
                secure: parse_bool("COOKIE_SECURE")?.unwrap_or(env_kind.is_production()),
            },
            rate_limit,
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            static_files: StaticConfig {
                dir: env::var("STATIC_DIR").ok().filter(|d| !d.trim().is_empty()),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
