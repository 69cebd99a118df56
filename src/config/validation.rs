//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use argon2::password_hash::PasswordHash;

use super::{Settings, StorageBackend, MAX_SESSION_TTL_SECONDS};
use crate::utils::errors::{Result, TechClubError};
use crate::utils::helpers::is_valid_email;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_storage_config(&settings.storage)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(TechClubError::Config("Server host is required".to_string()));
    }

    url::Url::parse(&config.public_base_url).map_err(|e| {
        TechClubError::Config(format!("Invalid public base URL {}: {}", config.public_base_url, e))
    })?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TechClubError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(TechClubError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(TechClubError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(TechClubError::Config("Redis URL is required".to_string()));
    }

    if config.ttl_seconds == 0 {
        return Err(TechClubError::Config(
            "Session TTL must be greater than 0".to_string(),
        ));
    }

    if config.ttl_seconds > MAX_SESSION_TTL_SECONDS {
        return Err(TechClubError::Config(format!(
            "Session TTL cannot exceed {} seconds",
            MAX_SESSION_TTL_SECONDS
        )));
    }

    Ok(())
}

/// Validate object storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.max_upload_bytes == 0 {
        return Err(TechClubError::Config(
            "Max upload size must be greater than 0".to_string(),
        ));
    }

    match config.backend {
        StorageBackend::Remote => {
            if config.url.is_empty() {
                return Err(TechClubError::Config(
                    "Storage URL is required for the remote backend".to_string(),
                ));
            }
            url::Url::parse(&config.url)?;
            if config.service_key.is_empty() {
                return Err(TechClubError::Config(
                    "Storage service key is required for the remote backend".to_string(),
                ));
            }
        }
        StorageBackend::Local => {
            if config.local_root.is_empty() {
                return Err(TechClubError::Config(
                    "Storage root directory is required for the local backend".to_string(),
                ));
            }
        }
        // Records outlive the process, in-memory images do not
        StorageBackend::Memory => {
            return Err(TechClubError::Config(
                "The memory storage backend cannot be used with a persistent database".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate admin accounts
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.admins.is_empty() {
        return Err(TechClubError::Config(
            "At least one admin account must be configured".to_string(),
        ));
    }

    for admin in &config.admins {
        if !is_valid_email(admin.email.trim()) {
            return Err(TechClubError::Config(format!("Invalid admin email: {:?}", admin.email)));
        }
        PasswordHash::new(&admin.password_hash).map_err(|e| {
            TechClubError::Config(format!("Invalid password hash for {}: {}", admin.email, e))
        })?;
    }

    if config.session_cookie.is_empty() {
        return Err(TechClubError::Config("Session cookie name is required".to_string()));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(TechClubError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(TechClubError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminAccount;
    use crate::services::auth::hash_password;
    use assert_matches::assert_matches;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.auth.admins = vec![AdminAccount {
            email: "admin@club.test".to_string(),
            password_hash: hash_password("correct horse").unwrap(),
        }];
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_admins_rejected() {
        let mut settings = valid_settings();
        settings.auth.admins.clear();
        assert_matches!(validate_settings(&settings), Err(TechClubError::Config(_)));
    }

    #[test]
    fn test_plaintext_password_rejected() {
        let mut settings = valid_settings();
        settings.auth.admins[0].password_hash = "hunter2".to_string();
        assert_matches!(validate_settings(&settings), Err(TechClubError::Config(msg)) if msg.contains("admin@club.test"));
    }

    #[test]
    fn test_remote_storage_requires_key() {
        let mut settings = valid_settings();
        settings.storage.backend = StorageBackend::Remote;
        settings.storage.url = "https://project.storage.example".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.storage.service_key = "service-role-key".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_session_ttl_bounds() {
        let mut settings = valid_settings();
        settings.redis.ttl_seconds = MAX_SESSION_TTL_SECONDS;
        assert!(validate_settings(&settings).is_ok());

        for ttl in [0, MAX_SESSION_TTL_SECONDS + 1, 10_000_000_000_000, u64::MAX] {
            settings.redis.ttl_seconds = ttl;
            assert_matches!(validate_settings(&settings), Err(TechClubError::Config(_)));
        }
    }

    #[test]
    fn test_memory_storage_rejected() {
        let mut settings = valid_settings();
        settings.storage.backend = StorageBackend::Memory;
        assert_matches!(validate_settings(&settings), Err(TechClubError::Config(msg)) if msg.contains("memory"));
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        assert!(validate_settings(&settings).is_err());
    }
}
