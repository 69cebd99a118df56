//! Database connection management

use std::time::Duration;

use sqlx::{Pool, Postgres};

use crate::config::DatabaseConfig;
use crate::utils::errors::TechClubError;

pub type DatabasePool = Pool<Postgres>;

/// Pool timeouts not exposed through the settings file
#[derive(Debug, Clone)]
pub struct PoolTimeouts {
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        Self {
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, TechClubError> {
    let timeouts = PoolTimeouts::default();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(timeouts.acquire_timeout)
        .idle_timeout(timeouts.idle_timeout)
        .max_lifetime(timeouts.max_lifetime)
        .connect(&config.url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), TechClubError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), TechClubError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
