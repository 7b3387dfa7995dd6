use crate::auth::JwtConfig;
use shared::error::{AppError, ErrorCode};
use shared::models::DEFAULT_CAPACITY;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | sqlite:bistro.db | SQLite database URL |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated in development | HS256 signing secret (>= 32 chars) |
/// | JWT_EXPIRATION_MINUTES | 480 | Token lifetime, also the revocation window of a disabled account |
/// | JWT_ISSUER | bistro-server | Token issuer |
/// | JWT_AUDIENCE | bistro-admin | Token audience |
/// | DEFAULT_CAPACITY | 40 | Capacity of a freshly created configuration |
/// | REQUEST_TIMEOUT_MS | 30000 | Request timeout |
/// | CORS_ORIGINS | (permissive) | Comma-separated allowed origins |
///
/// `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR` are read by [`LogConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub default_capacity: u32,
    pub request_timeout_ms: u64,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

const MIN_SECRET_LEN: usize = 32;

impl Config {
    /// Load configuration from environment variables
    ///
    /// Outside `development` the JWT secret must be set and long enough.
    pub fn from_env() -> Result<Self, AppError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt = JwtConfig {
            secret: Self::require_secret("JWT_SECRET", &environment)?,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "bistro-server".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "bistro-admin".into()),
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:bistro.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment,
            jwt,
            default_capacity: std::env::var("DEFAULT_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|c: &u32| *c > 0)
                .unwrap_or(DEFAULT_CAPACITY),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        })
    }

    /// Development configuration for a given database, with a random JWT secret
    ///
    /// Used by tests and the CLI sub-commands that never serve HTTP.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            http_port: 0,
            environment: "development".into(),
            jwt: JwtConfig {
                secret: crate::auth::jwt::generate_printable_secret(),
                expiration_minutes: 60,
                issuer: "bistro-server".into(),
                audience: "bistro-admin".into(),
            },
            default_capacity: DEFAULT_CAPACITY,
            request_timeout_ms: 30000,
            cors_origins: Vec::new(),
        }
    }

    /// Require a secret env var: must be set and long enough outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, AppError> {
        match std::env::var(name) {
            Ok(v) if v.len() >= MIN_SECRET_LEN => Ok(v),
            Ok(v) if environment == "development" => {
                tracing::warn!("{name} is shorter than {MIN_SECRET_LEN} characters");
                Ok(v)
            }
            Ok(_) => Err(AppError::with_message(
                ErrorCode::ConfigError,
                format!("{name} must be at least {MIN_SECRET_LEN} characters long"),
            )),
            Err(_) if environment == "development" => {
                tracing::warn!("{name} not set, generating a temporary secret for development");
                Ok(crate::auth::jwt::generate_printable_secret())
            }
            Err(_) => Err(AppError::with_message(
                ErrorCode::ConfigError,
                format!("{name} must be set in {environment} environment"),
            )),
        }
    }
}

/// Logging settings
///
/// Read on their own so the subscriber is installed before [`Config::from_env`]
/// reports secret warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
    /// Daily rolling file output; stdout when unset
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            dir: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::parse(
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_JSON").ok(),
            std::env::var("LOG_DIR").ok(),
        )
    }

    fn parse(level: Option<String>, json: Option<String>, dir: Option<String>) -> Self {
        Self {
            level: level
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "info".into()),
            json: json.and_then(|v| v.parse().ok()).unwrap_or(false),
            dir: dir.filter(|s| !s.is_empty()),
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
