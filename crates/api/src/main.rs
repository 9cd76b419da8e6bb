use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use edu_platform_api::app::{create_app, Stores};
use edu_platform_api::config::{Config, StorageBackend};
use edu_platform_api::middleware::{init_metrics, logging::init_logging};

const POOL_METRICS_PERIOD: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging)?;
    init_metrics().context("Failed to install Prometheus recorder")?;

    info!("Starting Edu Platform API v{}", env!("CARGO_PKG_VERSION"));

    let stores = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory record store");
            Stores::memory()
        }
        StorageBackend::Postgres => {
            let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool).await?;
            info!("Migrations completed");

            persistence::metrics::spawn_pool_metrics(pool.clone(), POOL_METRICS_PERIOD);
            Stores::postgres(pool)
        }
    };

    if config.storage.seed {
        let seeded = stores.seed_demo().await?;
        info!(records = seeded, "Demo data loaded");
    }

    let addr = config.socket_addr()?;
    let app = create_app(config, stores);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
