//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_URL` - Full URL of the website the panel reports on
//!   (required in production only; the host part becomes the WMP lookup key)
//!
//! ## Optional
//! - `PANEL_HOST` - Bind address (default: 127.0.0.1)
//! - `PANEL_PORT` - Listen port (default: 3001)
//! - `PANEL_ENV` - Deployment environment (default: development)
//! - `PANEL_OPTIONS_PATH` - Path of the persisted options blob (default: panel-options.json)
//! - `PANEL_LOG_FILE` - Append logs to this file in addition to stdout
//! - `WMP_API_BASE_URL` - WMP config API base the domain is appended to
//! - `WMP_PORTAL_URL` - WMP portal base for outbound deep-links
//! - `WMP_FIXTURE_DOMAIN` - Domain reported outside production
//! - `WMP_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `WMP_CACHE_TTL_SECS` - Record cache lifetime (default: 86400)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_API_BASE_URL: &str = "https://www.wmp.rrze.fau.de/api/cms/config/servername/";
const DEFAULT_PORTAL_URL: &str = "https://www.wmp.rrze.fau.de";
const DEFAULT_FIXTURE_DOMAIN: &str = "www.wp.rrze.fau.de";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment the panel runs in.
///
/// Everything except [`Environment::Production`] reports on the fixture
/// domain instead of the configured site, so the panel can be developed
/// against known-good WMP data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
}

impl Environment {
    /// `true` when the panel reports on the real site.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Environment name, as reported to Sentry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Panel application configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Full URL of the website the panel reports on
    pub site_url: Option<String>,
    /// WMP config API settings
    pub wmp: WmpConfig,
    /// Path of the persisted options blob
    pub options_path: PathBuf,
    /// Additional log file, appended to alongside stdout
    pub log_file: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// WMP config API settings.
#[derive(Debug, Clone)]
pub struct WmpConfig {
    /// Base URL the looked-up domain is appended to
    pub api_base_url: String,
    /// Portal base URL for outbound deep-links
    pub portal_url: String,
    /// Domain reported outside production
    pub fixture_domain: String,
    /// Timeout for a single API request
    pub http_timeout: Duration,
    /// How long a fetched record stays cached
    pub cache_ttl: Duration,
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse, or if `SITE_URL`
    /// is missing in production.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PANEL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PANEL_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_PORT".to_string(), e.to_string()))?;
        let environment = get_env_or_default("PANEL_ENV", "development")
            .parse::<Environment>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_ENV".to_string(), e))?;

        // Outside production the resolver substitutes the fixture domain,
        // so the site URL may be absent there.
        let site_url = if environment.is_production() {
            Some(get_required_env("SITE_URL")?)
        } else {
            get_optional_env("SITE_URL")
        };

        let wmp = WmpConfig::from_env()?;
        let options_path = get_env_or_default("PANEL_OPTIONS_PATH", "panel-options.json").into();
        let log_file = get_optional_env("PANEL_LOG_FILE").map(PathBuf::from);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            environment,
            site_url,
            wmp,
            options_path,
            log_file,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl WmpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let http_timeout = get_seconds_env("WMP_HTTP_TIMEOUT_SECS", "10")?;
        let cache_ttl = get_seconds_env("WMP_CACHE_TTL_SECS", "86400")?;

        Ok(Self {
            api_base_url: get_env_or_default("WMP_API_BASE_URL", DEFAULT_API_BASE_URL),
            portal_url: get_env_or_default("WMP_PORTAL_URL", DEFAULT_PORTAL_URL),
            fixture_domain: get_env_or_default("WMP_FIXTURE_DOMAIN", DEFAULT_FIXTURE_DOMAIN),
            http_timeout,
            cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable holding a whole number of seconds.
fn get_seconds_env(key: &str, default: &str) -> Result<Duration, ConfigError> {
    get_env_or_default(key, default)
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
