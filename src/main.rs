use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tasklists::config::{config, StorageBackend};
use tasklists::database::open_store;
use tasklists::{app, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasklists=info,tower_http=info")),
        )
        .init();

    let config = config();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting task lists in {:?} mode", config.environment);

    if is_production!() && config.storage.backend == StorageBackend::Memory {
        tracing::warn!("STORAGE_BACKEND=memory in production; all data is lost on restart");
    }

    let store = open_store(config).await.context("failed to open store")?;
    let app = app(AppState::new(store, config.clone()));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Task lists server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
