//! # Service Configuration
//!
//! Read once from the environment at startup. Every variable has a default
//! except `DATABASE_URL`, whose absence selects the in-memory store.
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `5002` |
//! | `DATABASE_URL` | unset (in-memory store) |
//! | `CERTVIEW_DB_MAX_CONNECTIONS` | `10` |
//! | `CERTVIEW_FIXTURES` | unset |
//! | `CERTVIEW_ALLOWED_ORIGINS` | the three deployment origins below |
//! | `CERTVIEW_METRICS_ENABLED` | `true` |

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Origins allowed by CORS when `CERTVIEW_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://cie-sparke-website.vercel.app",
    "http://localhost:3000",
    "http://localhost:5173",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse.
    #[error("invalid value for {var}: \"{value}\"")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration.
///
/// Custom `Debug` redacts the database URL, which usually carries a password.
#[derive(Clone)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: u32,
    /// JSON array of certificates loaded into the in-memory store.
    pub fixtures_path: Option<PathBuf>,
    /// CORS allow-list.
    pub allowed_origins: Vec<String>,
    /// Whether `/metrics` and the request metrics middleware are mounted.
    pub metrics_enabled: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("fixtures_path", &self.fixtures_path)
            .field("allowed_origins", &self.allowed_origins)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5002,
            database_url: None,
            db_max_connections: 10,
            fixtures_path: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let allowed_origins = match lookup("CERTVIEW_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()),
            db_max_connections: parse_or(
                &lookup,
                "CERTVIEW_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            fixtures_path: lookup("CERTVIEW_FIXTURES").map(PathBuf::from),
            allowed_origins,
            metrics_enabled: lookup("CERTVIEW_METRICS_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(defaults.metrics_enabled),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}
