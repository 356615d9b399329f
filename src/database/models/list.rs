use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::task::Task;

/// How the tasks of a list are ordered when the list is rendered.
/// Stored as text; changing it never touches the task rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    #[default]
    Created,
    Alphabetical,
    UnfinishedFirst,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 3] = [
        SortCriterion::Created,
        SortCriterion::Alphabetical,
        SortCriterion::UnfinishedFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Created => "created",
            SortCriterion::Alphabetical => "alphabetical",
            SortCriterion::UnfinishedFirst => "unfinished_first",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortCriterion::Created => "Creation order",
            SortCriterion::Alphabetical => "Alphabetical",
            SortCriterion::UnfinishedFirst => "Unfinished first",
        }
    }

    /// Order tasks for display. Ties always fall back to id so output is stable.
    pub fn apply(&self, tasks: &mut [Task]) {
        match self {
            SortCriterion::Created => tasks.sort_by_key(|t| t.id),
            SortCriterion::Alphabetical => tasks.sort_by(|a, b| {
                a.description
                    .to_lowercase()
                    .cmp(&b.description.to_lowercase())
                    .then(a.id.cmp(&b.id))
            }),
            SortCriterion::UnfinishedFirst => tasks.sort_by_key(|t| (t.done, t.id)),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortCriterion(pub String);

impl fmt::Display for UnknownSortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid sort criterion", self.0)
    }
}

impl std::error::Error for UnknownSortCriterion {}

impl FromStr for SortCriterion {
    type Err = UnknownSortCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortCriterion::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| UnknownSortCriterion(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub title: String,
    pub author: Uuid,
    pub sort_criterion: SortCriterion,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `lists` row; `sort_criterion` is decoded separately so an unknown
/// value in the table degrades to the default instead of failing the query.
#[derive(Debug, Clone, FromRow)]
pub struct ListRow {
    pub id: i64,
    pub title: String,
    pub author: Uuid,
    pub sort_criterion: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ListRow> for List {
    fn from(row: ListRow) -> Self {
        let sort_criterion = row.sort_criterion.parse().unwrap_or_else(|e| {
            tracing::warn!("List {}: {}, using default", row.id, e);
            SortCriterion::default()
        });
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            sort_criterion,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Fields for a new list. The author is always the requesting principal.
#[derive(Debug, Clone)]
pub struct NewList {
    pub title: String,
    pub author: Uuid,
}
