use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user display preferences. One row per user, created on first access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FrontendOptions {
    pub user_id: Uuid,
    pub hide_finished_tasks: bool,
    pub updated_at: DateTime<Utc>,
}

impl FrontendOptions {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            hide_finished_tasks: false,
            updated_at: Utc::now(),
        }
    }
}
