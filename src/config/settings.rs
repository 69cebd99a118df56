//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL the site is reachable under, used for locally served media
    pub public_base_url: String,
    pub secure_cookies: bool,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Longest admin session lifetime accepted (30 days)
pub const MAX_SESSION_TTL_SECONDS: u64 = 30 * 24 * 3600;

/// Redis configuration (admin sessions)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

impl RedisConfig {
    /// Session lifetime, capped at [`MAX_SESSION_TTL_SECONDS`]
    pub fn session_ttl(&self) -> chrono::Duration {
        let seconds = i64::try_from(self.ttl_seconds.min(MAX_SESSION_TTL_SECONDS)).unwrap_or(0);
        chrono::Duration::seconds(seconds)
    }
}

/// Which object storage implementation backs the image buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Remote,
    Local,
    Memory,
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Base URL of the storage API (remote backend)
    pub url: String,
    /// Service key sent as bearer token (remote backend)
    pub service_key: String,
    /// Directory holding one sub-directory per bucket (local backend)
    pub local_root: String,
    pub max_upload_bytes: usize,
}

/// A configured admin account
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminAccount {
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

/// Admin authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub admins: Vec<AdminAccount>,
    pub session_cookie: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("TECHCLUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::TechClubError> {
        super::validation::validate_settings(self)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                public_base_url: "http://localhost:8080".to_string(),
                secure_cookies: false,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/techclub".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "techclub:".to_string(),
                ttl_seconds: 8 * 3600,
            },
            storage: StorageConfig {
                backend: StorageBackend::Local,
                url: String::new(),
                service_key: String::new(),
                local_root: "./media".to_string(),
                max_upload_bytes: 5 * 1024 * 1024,
            },
            auth: AuthConfig {
                admins: vec![],
                session_cookie: "techclub_session".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "./logs".to_string(),
                json: false,
            },
        }
    }
}
