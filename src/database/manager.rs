use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the PostgreSQL connection pool backing `PgStore`
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool sized and timed by `DatabaseConfig`
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(database_url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!(
            "Created database pool for: {} (max {} connections)",
            Self::redacted(&connection_string),
            config.max_connections
        );
        Ok(pool)
    }

    /// Validate the URL scheme before handing it to sqlx
    fn build_connection_string(database_url: &str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "postgres" | "postgresql" => {}
            _ => return Err(DatabaseError::InvalidDatabaseUrl),
        }
        if url.path().trim_start_matches('/').is_empty() {
            return Err(DatabaseError::InvalidDatabaseUrl);
        }
        Ok(url.into())
    }

    /// Host and database only, for logs
    pub fn redacted(connection_string: &str) -> String {
        match url::Url::parse(connection_string) {
            Ok(url) => format!("{}{}", url.host_str().unwrap_or("?"), url.path()),
            Err(_) => "<invalid>".to_string(),
        }
    }
}
