//! Server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use notes_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PagePolicy};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Debug mode toggle.
    pub debug: bool,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Page size limits for `GET /notes`.
    pub page_policy: PagePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3001,
            debug: false,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            page_policy: PagePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `HOST`: Bind address (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 3001)
    /// - `DEBUG`: Debug mode, `1`/`true`/`yes` (default: false)
    /// - `LOG_LEVEL`: Logging level (default: "info", or "debug" in debug mode)
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `NOTES_DEFAULT_PAGE_SIZE`: Default page size (default: 50)
    /// - `NOTES_MAX_PAGE_SIZE`: Maximum page size (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "HOST")?.unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);

        let debug = lookup("DEBUG")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let log_level = lookup("LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| (if debug { "debug" } else { "info" }).to_string());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.cors_allowed_origins);

        let default_page_size =
            parse_var(&lookup, "NOTES_DEFAULT_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);
        let max_page_size = parse_var(&lookup, "NOTES_MAX_PAGE_SIZE")?.unwrap_or(MAX_PAGE_SIZE);
        if default_page_size == 0 || max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "NOTES_DEFAULT_PAGE_SIZE/NOTES_MAX_PAGE_SIZE".to_string(),
                reason: "page sizes must be at least 1".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            debug,
            log_level,
            cors_allowed_origins,
            page_policy: PagePolicy::new(default_page_size, max_page_size),
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
