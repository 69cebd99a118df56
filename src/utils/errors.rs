//! Error handling for TechClub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use uuid::Uuid;

use super::helpers::format_bytes;

/// Main error type for TechClub application
#[derive(Error, Debug)]
pub enum TechClubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Malformed form submission: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Object storage specific errors
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("file is empty")]
    EmptyFile,

    #[error("file name has no recognizable extension: {0}")]
    MissingExtension(String),

    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("bucket {bucket} rejected the write ({status}): {message}")]
    Rejected { bucket: String, status: u16, message: String },

    #[error("object {key} already exists in bucket {bucket}")]
    AlreadyExists { bucket: String, key: String },

    #[error("storage request failed: {0}")]
    Transport(String),

    #[error("storage I/O failed: {0}")]
    Io(String),
}

/// Result type alias for TechClub operations
pub type Result<T> = std::result::Result<T, TechClubError>;

/// Result type alias for storage operations
pub type UploadResult<T> = std::result::Result<T, UploadError>;

impl TechClubError {
    /// Shorthand for a missing record of the given resource kind
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        TechClubError::NotFound { kind, id }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TechClubError::Migration(_) => ErrorSeverity::Critical,
            TechClubError::Config(_) => ErrorSeverity::Critical,
            TechClubError::ConfigLoad(_) => ErrorSeverity::Critical,
            TechClubError::Auth(_) => ErrorSeverity::Warning,
            TechClubError::NotFound { .. } => ErrorSeverity::Warning,
            TechClubError::Validation(_) => ErrorSeverity::Info,
            TechClubError::Multipart(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status used when the error reaches a handler boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            TechClubError::NotFound { .. } => StatusCode::NOT_FOUND,
            TechClubError::Auth(_) => StatusCode::UNAUTHORIZED,
            TechClubError::Validation(_) | TechClubError::Multipart(_) => StatusCode::BAD_REQUEST,
            TechClubError::Upload(UploadError::EmptyFile)
            | TechClubError::Upload(UploadError::MissingExtension(_)) => StatusCode::BAD_REQUEST,
            TechClubError::Upload(UploadError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            TechClubError::Upload(_) | TechClubError::Http(_) => StatusCode::BAD_GATEWAY,
            TechClubError::ServiceUnavailable(_) | TechClubError::Redis(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to a site visitor or admin
    pub fn user_message(&self) -> String {
        match self {
            TechClubError::Upload(UploadError::TooLarge { limit, .. }) => {
                format!("Image upload failed: the limit is {}", format_bytes(*limit as u64))
            }
            TechClubError::Upload(e) => format!("Image upload failed: {}", e),
            TechClubError::NotFound { kind, .. } => format!("{} not found", kind),
            TechClubError::Auth(msg) | TechClubError::Validation(msg) => msg.clone(),
            TechClubError::Multipart(_) => "The submitted form could not be read".to_string(),
            TechClubError::Database(_) | TechClubError::Persistence(_) => {
                "The record could not be saved, please try again".to_string()
            }
            _ => "Something went wrong, please try again".to_string(),
        }
    }
}

impl IntoResponse for TechClubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %self, status = status.as_u16(), "Request failed");
            }
            _ => {
                tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            }
        }

        (status, self.user_message()).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
