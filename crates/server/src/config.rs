//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OVENLINE_DATABASE_URL` - SQLite connection string
//!   (e.g., `sqlite://data/ovenline.db`); falls back to `DATABASE_URL`
//!
//! ## Optional
//! - `OVENLINE_HOST` - Bind address (default: 127.0.0.1)
//! - `OVENLINE_PORT` - Listen port (default: 3000)
//! - `OVENLINE_BASE_URL` - Public URL (default: `http://localhost:3000`);
//!   session cookies are marked secure when this is https

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection URL (may embed credentials, so kept secret)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the server
    pub base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("OVENLINE_DATABASE_URL")?;
        let host = get_env_or_default("OVENLINE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("OVENLINE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("OVENLINE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("OVENLINE_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("OVENLINE_BASE_URL", "http://localhost:3000");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should be marked secure (HTTPS deployment).
    #[must_use]
    pub fn cookies_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
