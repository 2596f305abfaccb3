//! Configuration management for ProductivePro
//!
//! Handles environment variables and application settings.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Emit logs as JSON instead of the console format
    pub log_json: bool,

    /// Directory of static assets served at the root path
    pub public_dir: PathBuf,

    /// CORS origins (empty means allow all)
    pub cors_origins: Vec<String>,

    /// IANA timezone used for daily stats rollover
    pub timezone: String,

    /// How many finished sessions to keep per user
    pub session_history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            public_dir: PathBuf::from("./public"),
            cors_origins: vec![],
            timezone: "UTC".to_string(),
            session_history_limit: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server configuration
        if let Ok(host) = env::var("PRODUCTIVEPRO_HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PRODUCTIVEPRO_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }

        // Environment
        if let Ok(environment) = env::var("PRODUCTIVEPRO_ENVIRONMENT") {
            config.environment = environment;
        }

        // Logging
        if let Ok(log_level) = env::var("PRODUCTIVEPRO_LOG_LEVEL") {
            config.log_level = log_level;
        }

        if let Ok(log_json) = env::var("PRODUCTIVEPRO_LOG_JSON") {
            config.log_json = log_json
                .parse()
                .map_err(|_| ConfigError::InvalidBool(log_json))?;
        }

        // Static assets
        if let Ok(public_dir) = env::var("PRODUCTIVEPRO_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(public_dir);
        }

        // CORS origins
        if let Ok(cors_origins) = env::var("PRODUCTIVEPRO_CORS_ORIGINS") {
            config.cors_origins = cors_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Stats rollover timezone
        if let Ok(timezone) = env::var("PRODUCTIVEPRO_TIMEZONE") {
            config.timezone = timezone;
        }

        // Session history
        if let Ok(limit) = env::var("PRODUCTIVEPRO_SESSION_HISTORY_LIMIT") {
            config.session_history_limit = limit
                .parse()
                .map_err(|_| ConfigError::InvalidHistoryLimit(limit))?;
        }

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        // Validate port
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }

        // Validate static assets directory
        if self.public_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPublicDir);
        }

        // Validate timezone
        if self.timezone.parse::<Tz>().is_err() {
            return Err(ConfigError::UnknownTimezone(self.timezone.clone()));
        }

        // Validate session history limit; the live session counts against it
        if self.session_history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit(
                self.session_history_limit.to_string(),
            ));
        }

        Ok(())
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get server URL
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Get the parsed stats rollover timezone
    pub fn rollover_timezone(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    /// Log configuration
    pub fn log_config(&self) {
        info!("Configuration loaded:");
        info!("  Environment: {}", self.environment);
        info!("  Bind address: {}", self.bind_address());
        info!("  Public directory: {:?}", self.public_dir);
        info!("  Log level: {}", self.log_level);
        info!("  Log format: {}", if self.log_json { "json" } else { "console" });
        info!("  CORS origins: {:?}", self.cors_origins);
        info!("  Rollover timezone: {}", self.timezone);
        info!("  Session history limit: {}", self.session_history_limit);
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid boolean value: {0}")]
    InvalidBool(String),

    #[error("Invalid session history limit: {0}")]
    InvalidHistoryLimit(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Empty public directory")]
    EmptyPublicDir,
}
