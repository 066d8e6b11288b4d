//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>).
//!   An `https://` URL turns on secure session cookies.
//! - `STOREFRONT_CATALOG_PATH` - JSON catalog fixture replacing the built-in one
//! - `STOREFRONT_CONTENT_DIR` - Markdown pages directory
//!   (default: crates/storefront/content)
//! - `STOREFRONT_STATIC_DIR` - Static assets directory
//!   (default: crates/storefront/static)
//! - `STOREFRONT_SESSION_EXPIRY_SECS` - Session inactivity expiry (default: 7 days)
//! - `STOREFRONT_JSON_LOGS` - `true` for JSON log lines (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Default session expiry in seconds (7 days).
const DEFAULT_SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Catalog fixture override; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Directory holding `pages/*.md`
    pub content_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Seconds of inactivity before a shopper's session (and cart) is dropped
    pub session_expiry_secs: i64,
    /// Emit logs as JSON instead of human-readable text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced in Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        Ok(Self {
            host: env.parse_or("STOREFRONT_HOST", "127.0.0.1")?,
            port: env.parse_or("STOREFRONT_PORT", "3000")?,
            base_url: env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000"),
            catalog_path: env.optional("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            content_dir: PathBuf::from(
                env.or_default("STOREFRONT_CONTENT_DIR", "crates/storefront/content"),
            ),
            static_dir: PathBuf::from(
                env.or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"),
            ),
            session_expiry_secs: env.parse_or(
                "STOREFRONT_SESSION_EXPIRY_SECS",
                &DEFAULT_SESSION_EXPIRY_SECONDS.to_string(),
            )?,
            json_logs: env.parse_or("STOREFRONT_JSON_LOGS", "false")?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source wrapper with typed accessors.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.content_dir, PathBuf::from("crates/storefront/content"));
        assert_eq!(config.static_dir, PathBuf::from("crates/storefront/static"));
        assert_eq!(config.session_expiry_secs, 604_800);
        assert!(!config.json_logs);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://luxury.example"),
            ("STOREFRONT_CATALOG_PATH", "/srv/catalog.json"),
            ("STOREFRONT_SESSION_EXPIRY_SECS", "60"),
            ("STOREFRONT_JSON_LOGS", "true"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(config.session_expiry_secs, 60);
        assert!(config.json_logs);
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("STOREFRONT_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(config_from(&[("STOREFRONT_HOST", "localhost:80")]).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = config_from(&[("STOREFRONT_PORT", "3001")]).unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }
}
