//! TechClub website
//!
//! Public pages (home, events, team roster, photo gallery) and a protected
//! admin panel for a university technical club. Records live in Postgres,
//! images in object storage buckets, admin sessions in Redis. Each of these
//! sits behind a trait with an in-process implementation for tests.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, TechClubError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::router;
pub use services::ServiceFactory;
pub use state::AppContext;

use tokio::signal;
use tracing::{error, info};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
