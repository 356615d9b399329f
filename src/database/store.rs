use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{AppConfig, StorageBackend};
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::memory::MemoryStore;
use crate::database::models::{FrontendOptions, List, NewList, SortCriterion, Task, TaskFields};
use crate::database::postgres::PgStore;

/// Persistence operations for lists, tasks and per-user options.
///
/// Implementations do no authorization of their own; callers check
/// ownership first. Single-field mutations (`toggle_*`) must be atomic
/// in the backend so concurrent toggles resolve as last-write-wins.
#[async_trait]
pub trait Store: Send + Sync {
    /// Lists authored by `author`, ordered by id
    async fn lists_for(&self, author: Uuid) -> Result<Vec<List>, DatabaseError>;

    async fn get_list(&self, id: i64) -> Result<Option<List>, DatabaseError>;

    async fn create_list(&self, new: NewList) -> Result<List, DatabaseError>;

    async fn update_list_title(&self, id: i64, title: &str) -> Result<List, DatabaseError>;

    async fn update_sort_criterion(&self, id: i64, criterion: SortCriterion) -> Result<List, DatabaseError>;

    /// Deletes the list and every task in it
    async fn delete_list(&self, id: i64) -> Result<(), DatabaseError>;

    /// Tasks of a list, in insertion order
    async fn tasks_for_list(&self, list_id: i64) -> Result<Vec<Task>, DatabaseError>;

    async fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError>;

    async fn create_task(&self, list_id: i64, fields: TaskFields) -> Result<Task, DatabaseError>;

    async fn update_task(&self, id: i64, fields: TaskFields) -> Result<Task, DatabaseError>;

    async fn delete_task(&self, id: i64) -> Result<(), DatabaseError>;

    async fn toggle_task_done(&self, id: i64) -> Result<Task, DatabaseError>;

    /// Get-or-create the options row for `user_id`
    async fn frontend_options(&self, user_id: Uuid) -> Result<FrontendOptions, DatabaseError>;

    /// Flip `hide_finished_tasks`, creating the row (already flipped) if absent
    async fn toggle_hide_finished(&self, user_id: Uuid) -> Result<FrontendOptions, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

pub type SharedStore = Arc<dyn Store>;

/// Build the backend selected in `AppConfig::storage`
pub async fn open_store(config: &AppConfig) -> Result<SharedStore, DatabaseError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
            let pool = DatabaseManager::connect(url, &config.database).await?;
            let store = PgStore::new(pool, config.database.enable_query_logging);
            if config.storage.ensure_schema {
                store.ensure_schema().await?;
            }
            Ok(Arc::new(store))
        }
    }
}
