//! Food Diary HTTP server
//!
//! Serves the food diary API over the SQLite database named in the
//! configuration.
//!
//! # Configuration
//!
//! Read from the same YAML file as the CLI (`FOODDIARY_CONFIG` overrides its
//! location), then from environment variables:
//! - `FOODDIARY_PORT`: Port to listen on (default: 8080)
//! - `FOODDIARY_DATABASE_PATH`: SQLite database file
//! - `FOODDIARY_USER`: User for requests without an `X-User-Id` header

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fooddiary::config::Config;
use fooddiary::db::{init_db, SqliteFoodEntryStore};
use fooddiary::server::{router, AppState};
use fooddiary_core::{FoodEntryStore, UserId};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fooddiary=info,fooddiary_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("FOODDIARY_CONFIG").ok().map(PathBuf::from);
    let config = Config::load(config_path)?;

    match &config.config_file {
        Some(path) => tracing::info!("Config file: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("Database: {}", config.database_path.value.display());

    let pool = init_db(&config.database_path.value).await?;
    let store: Arc<dyn FoodEntryStore> = Arc::new(SqliteFoodEntryStore::new(pool));
    let default_user = UserId::new(config.user.value.as_str())?;
    tracing::info!("Default user: {}", default_user);

    let app = router(AppState::new(store, default_user));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port.value));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
