//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the TechClub application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{Result, TechClubError};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer when dropped and must be held
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "techclub.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_json = config
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout));
    let stdout_text = (!config.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(stdout_json)
        .with(stdout_text)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| TechClubError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin = admin,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log authentication attempts
pub fn log_sign_in(email: &str, success: bool) {
    if success {
        info!(email = email, "Admin signed in");
    } else {
        warn!(email = email, "Admin sign-in rejected");
    }
}

/// Log a stored object that could not be removed and is now orphaned
pub fn log_orphaned_object(bucket: &str, key: &str, reason: &str) {
    warn!(
        bucket = bucket,
        key = key,
        reason = reason,
        "Storage object left orphaned, remove it manually"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
