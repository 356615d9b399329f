use crate::database::models::{List, TaskWithList};
use crate::database::SharedStore;
use crate::error::ApiError;
use crate::guard;
use crate::middleware::Principal;

/// Record lookups scoped to the requesting principal.
///
/// Listing filters by author. Single-record lookups load by id first and
/// then run the guard, so an unknown id is NotFound and a foreign one is
/// Forbidden.
pub struct ListService {
    store: SharedStore,
}

impl ListService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Lists authored by the principal, nothing else
    pub async fn lists_for(&self, principal: &Principal) -> Result<Vec<List>, ApiError> {
        let lists = self.store.lists_for(principal.id).await?;
        tracing::debug!("{} lists for {}", lists.len(), principal.id);
        Ok(lists)
    }

    pub async fn owned_list(&self, principal: &Principal, id: i64) -> Result<List, ApiError> {
        let list = self
            .store
            .get_list(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("List {} not found", id)))?;

        guard::authorize(principal, &list)?;
        Ok(list)
    }

    pub async fn owned_task(&self, principal: &Principal, id: i64) -> Result<TaskWithList, ApiError> {
        let task = self
            .store
            .get_task(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Task {} not found", id)))?;

        // A task whose list vanished mid-request is as gone as the list
        let list = self
            .store
            .get_list(task.list_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Task {} not found", id)))?;

        let record = TaskWithList { task, list };
        guard::authorize(principal, &record)?;
        Ok(record)
    }
}
