//! TechClub website
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::net::TcpListener;
use tracing::info;

use TechClub::{
    config::Settings,
    database::{connection::create_pool, run_migrations, DatabaseService},
    services::{hash_password, ServiceFactory},
    state::{AppContext, RedisSessionStore},
    utils::logging,
};

const USAGE: &str = "usage: TechClub [--print-default-config | --hash-password <password>]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {}
        Some("--print-default-config") => {
            println!("{}", toml::to_string_pretty(&Settings::default())?);
            return Ok(());
        }
        Some("--hash-password") => {
            let password = args.get(1).context(USAGE)?;
            println!("{}", hash_password(password)?);
            return Ok(());
        }
        Some(other) => bail!("unknown argument {}\n{}", other, USAGE),
    }

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", TechClub::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;
    run_migrations(&db_pool).await?;

    // Initialize Redis session store
    info!("Connecting to Redis...");
    let sessions = RedisSessionStore::new(&settings.redis).await?;

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(&settings, Arc::new(sessions)).await?;
    let database = DatabaseService::postgres(db_pool, services.objects.clone());
    let ctx = AppContext::new(settings.clone(), database, services.media, services.auth);

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;
    info!("Server running on {}", address);

    axum::serve(listener, TechClub::router(ctx))
        .with_graceful_shutdown(TechClub::shutdown_signal())
        .await?;

    info!("TechClub site has been shut down.");
    Ok(())
}
