use anyhow::Context;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};

/// Create the lists/tasks/frontend_options tables if they are missing
pub async fn init(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = config
        .storage
        .database_url
        .as_deref()
        .context("DATABASE_URL is not set")?;

    let pool = DatabaseManager::connect(url, &config.database)
        .await
        .with_context(|| format!("connecting to {}", DatabaseManager::redacted(url)))?;

    PgStore::new(pool, config.database.enable_query_logging)
        .ensure_schema()
        .await
        .context("creating schema")?;

    output_success(&output_format, "Schema is up to date", None)
}
