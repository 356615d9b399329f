use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{FrontendOptions, List, NewList, SortCriterion, Task, TaskFields};
use crate::database::store::Store;

#[derive(Default)]
struct Tables {
    lists: BTreeMap<i64, List>,
    tasks: BTreeMap<i64, Task>,
    options: HashMap<Uuid, FrontendOptions>,
    next_list_id: i64,
    next_task_id: i64,
}

impl Tables {
    fn list_mut(&mut self, id: i64) -> Result<&mut List, DatabaseError> {
        self.lists
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("List {} not found", id)))
    }

    fn task_mut(&mut self, id: i64) -> Result<&mut Task, DatabaseError> {
        self.tasks
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Task {} not found", id)))
    }
}

/// Process-local store. Every operation holds the table lock for its whole
/// read-modify-write, so toggles are atomic here too.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn lists_for(&self, author: Uuid) -> Result<Vec<List>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .lists
            .values()
            .filter(|l| l.author == author)
            .cloned()
            .collect())
    }

    async fn get_list(&self, id: i64) -> Result<Option<List>, DatabaseError> {
        Ok(self.tables.read().await.lists.get(&id).cloned())
    }

    async fn create_list(&self, new: NewList) -> Result<List, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_list_id += 1;
        let now = Utc::now();
        let list = List {
            id: tables.next_list_id,
            title: new.title,
            author: new.author,
            sort_criterion: SortCriterion::default(),
            created_at: now,
            updated_at: now,
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn update_list_title(&self, id: i64, title: &str) -> Result<List, DatabaseError> {
        let mut tables = self.tables.write().await;
        let list = tables.list_mut(id)?;
        list.title = title.to_string();
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    async fn update_sort_criterion(&self, id: i64, criterion: SortCriterion) -> Result<List, DatabaseError> {
        let mut tables = self.tables.write().await;
        let list = tables.list_mut(id)?;
        list.sort_criterion = criterion;
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    async fn delete_list(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.lists.remove(&id).is_none() {
            return Err(DatabaseError::NotFound(format!("List {} not found", id)));
        }
        tables.tasks.retain(|_, t| t.list_id != id);
        Ok(())
    }

    async fn tasks_for_list(&self, list_id: i64) -> Result<Vec<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| t.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn create_task(&self, list_id: i64, fields: TaskFields) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.lists.contains_key(&list_id) {
            return Err(DatabaseError::NotFound(format!("List {} not found", list_id)));
        }
        tables.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: tables.next_task_id,
            list_id,
            description: fields.description,
            done: fields.done,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i64, fields: TaskFields) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        let task = tables.task_mut(id)?;
        task.description = fields.description;
        task.done = fields.done;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("Task {} not found", id)))
    }

    async fn toggle_task_done(&self, id: i64) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        let task = tables.task_mut(id)?;
        task.done = !task.done;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn frontend_options(&self, user_id: Uuid) -> Result<FrontendOptions, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .options
            .entry(user_id)
            .or_insert_with(|| FrontendOptions::new(user_id))
            .clone())
    }

    async fn toggle_hide_finished(&self, user_id: Uuid) -> Result<FrontendOptions, DatabaseError> {
        let mut tables = self.tables.write().await;
        let options = tables
            .options
            .entry(user_id)
            .or_insert_with(|| FrontendOptions::new(user_id));
        options.hide_finished_tasks = !options.hide_finished_tasks;
        options.updated_at = Utc::now();
        Ok(options.clone())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
