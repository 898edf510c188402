use std::sync::Arc;

use anyhow::{Context, Result};
use minircp_core::AppConfig;
use minircp_storage::{Database, DbEventStore};
use minircp_worker::{IngestCycle, Scheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minircp_worker=info,minircp_core=info,minircp_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("minircp-worker starting...");

    dotenvy::dotenv().ok();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = Database::from_url(&config.database_url())
        .await
        .context("Failed to open events database")?;
    db.init_schema()
        .await
        .context("Failed to initialize events schema")?;
    tracing::info!("connected to events database");

    let store = Arc::new(DbEventStore::new(db));
    let cycle = Arc::new(IngestCycle::new(&config, store));
    let scheduler = Arc::new(Scheduler::new(config.processing_interval()));

    let loop_handle = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.run(cycle).await }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, stopping scheduler");
    scheduler.shutdown();
    loop_handle.await?;

    tracing::info!("worker shutdown complete");
    Ok(())
}
