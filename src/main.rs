use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use vantage::api;
use vantage::config::{Config, DatabaseBackend};
use vantage::storage::{EventStore, PostgresEventStore, SqliteEventStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize the event store
    let store: Arc<dyn EventStore> = match config.database.backend {
        DatabaseBackend::Sqlite => {
            info!("Using SQLite event store: {}", config.database.url);
            Arc::new(
                SqliteEventStore::new(&config.database.url, config.database.max_connections)
                    .await?,
            )
        }
        DatabaseBackend::Postgres => {
            info!("Using PostgreSQL event store: {}", config.database.url);
            Arc::new(
                PostgresEventStore::new(&config.database.url, config.database.max_connections)
                    .await?,
            )
        }
    };

    info!("Initializing event store...");
    store.init().await?;
    info!("Event store initialized successfully");

    // Create router
    let router = api::create_api_router(Arc::clone(&store), &config.analytics);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Analytics API listening on http://{}", addr);
    info!(
        "   - Summary endpoint at http://{}/analytics/summary?range=7d",
        addr
    );

    axum::serve(listener, router).await?;

    Ok(())
}
