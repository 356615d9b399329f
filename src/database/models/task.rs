use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::list::List;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub list_id: i64,
    pub description: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated task fields. The parent list comes from the URL, never the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub description: String,
    pub done: bool,
}

/// A task together with the list that owns it; ownership checks go through `list`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithList {
    pub task: Task,
    pub list: List,
}
