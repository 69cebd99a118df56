//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{AdminSession, GuardState};
pub use logging::log_requests;
