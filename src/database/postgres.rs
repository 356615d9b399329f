use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{FrontendOptions, List, ListRow, NewList, SortCriterion, Task, TaskFields};
use crate::database::store::Store;

const LIST_COLUMNS: &str = "id, title, author, sort_criterion, created_at, updated_at";
const TASK_COLUMNS: &str = "id, list_id, description, done, created_at, updated_at";
const OPTION_COLUMNS: &str = "user_id, hide_finished_tasks, updated_at";

/// Table bootstrap, applied statement by statement
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS lists (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        author UUID NOT NULL,
        sort_criterion TEXT NOT NULL DEFAULT 'created',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS lists_author_idx ON lists (author)",
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id BIGSERIAL PRIMARY KEY,
        list_id BIGINT NOT NULL REFERENCES lists (id) ON DELETE CASCADE,
        description VARCHAR(500) NOT NULL,
        done BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS tasks_list_id_idx ON tasks (list_id)",
    r#"
    CREATE TABLE IF NOT EXISTS frontend_options (
        user_id UUID PRIMARY KEY,
        hide_finished_tasks BOOLEAN NOT NULL DEFAULT FALSE,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// PostgreSQL-backed store
pub struct PgStore {
    pool: PgPool,
    log_queries: bool,
}

impl PgStore {
    pub fn new(pool: PgPool, log_queries: bool) -> Self {
        Self { pool, log_queries }
    }

    /// Create the tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::SchemaError(e.to_string()))?;
        }
        tracing::info!("Database schema ready ({} statements)", SCHEMA.len());
        Ok(())
    }

    fn trace(&self, sql: &str) {
        if self.log_queries {
            tracing::debug!(target: "tasklists::sql", "{}", sql.trim());
        }
    }

    fn not_found(kind: &str, id: i64) -> DatabaseError {
        DatabaseError::NotFound(format!("{} {} not found", kind, id))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn lists_for(&self, author: Uuid) -> Result<Vec<List>, DatabaseError> {
        let sql = format!("SELECT {} FROM lists WHERE author = $1 ORDER BY id", LIST_COLUMNS);
        self.trace(&sql);
        let rows = sqlx::query_as::<_, ListRow>(&sql)
            .bind(author)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(List::from).collect())
    }

    async fn get_list(&self, id: i64) -> Result<Option<List>, DatabaseError> {
        let sql = format!("SELECT {} FROM lists WHERE id = $1", LIST_COLUMNS);
        self.trace(&sql);
        let row = sqlx::query_as::<_, ListRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(List::from))
    }

    async fn create_list(&self, new: NewList) -> Result<List, DatabaseError> {
        let sql = format!(
            "INSERT INTO lists (title, author, sort_criterion) VALUES ($1, $2, $3) RETURNING {}",
            LIST_COLUMNS
        );
        self.trace(&sql);
        let row = sqlx::query_as::<_, ListRow>(&sql)
            .bind(&new.title)
            .bind(new.author)
            .bind(SortCriterion::default().as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update_list_title(&self, id: i64, title: &str) -> Result<List, DatabaseError> {
        let sql = format!(
            "UPDATE lists SET title = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            LIST_COLUMNS
        );
        self.trace(&sql);
        sqlx::query_as::<_, ListRow>(&sql)
            .bind(id)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?
            .map(List::from)
            .ok_or_else(|| Self::not_found("List", id))
    }

    async fn update_sort_criterion(&self, id: i64, criterion: SortCriterion) -> Result<List, DatabaseError> {
        let sql = format!(
            "UPDATE lists SET sort_criterion = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            LIST_COLUMNS
        );
        self.trace(&sql);
        sqlx::query_as::<_, ListRow>(&sql)
            .bind(id)
            .bind(criterion.as_str())
            .fetch_optional(&self.pool)
            .await?
            .map(List::from)
            .ok_or_else(|| Self::not_found("List", id))
    }

    async fn delete_list(&self, id: i64) -> Result<(), DatabaseError> {
        // tasks go with it via ON DELETE CASCADE
        let sql = "DELETE FROM lists WHERE id = $1";
        self.trace(sql);
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found("List", id));
        }
        Ok(())
    }

    async fn tasks_for_list(&self, list_id: i64) -> Result<Vec<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE list_id = $1 ORDER BY id", TASK_COLUMNS);
        self.trace(&sql);
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(list_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, DatabaseError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        self.trace(&sql);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn create_task(&self, list_id: i64, fields: TaskFields) -> Result<Task, DatabaseError> {
        let sql = format!(
            "INSERT INTO tasks (list_id, description, done) VALUES ($1, $2, $3) RETURNING {}",
            TASK_COLUMNS
        );
        self.trace(&sql);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(list_id)
            .bind(&fields.description)
            .bind(fields.done)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    Self::not_found("List", list_id)
                }
                other => DatabaseError::Sqlx(other),
            })?;
        Ok(task)
    }

    async fn update_task(&self, id: i64, fields: TaskFields) -> Result<Task, DatabaseError> {
        let sql = format!(
            "UPDATE tasks SET description = $2, done = $3, updated_at = now() WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        );
        self.trace(&sql);
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(&fields.description)
            .bind(fields.done)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Self::not_found("Task", id))
    }

    async fn delete_task(&self, id: i64) -> Result<(), DatabaseError> {
        let sql = "DELETE FROM tasks WHERE id = $1";
        self.trace(sql);
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found("Task", id));
        }
        Ok(())
    }

    async fn toggle_task_done(&self, id: i64) -> Result<Task, DatabaseError> {
        let sql = format!(
            "UPDATE tasks SET done = NOT done, updated_at = now() WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        );
        self.trace(&sql);
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Self::not_found("Task", id))
    }

    async fn frontend_options(&self, user_id: Uuid) -> Result<FrontendOptions, DatabaseError> {
        // The no-op update makes RETURNING yield the row on both paths
        let sql = format!(
            "INSERT INTO frontend_options (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {}",
            OPTION_COLUMNS
        );
        self.trace(&sql);
        let options = sqlx::query_as::<_, FrontendOptions>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(options)
    }

    async fn toggle_hide_finished(&self, user_id: Uuid) -> Result<FrontendOptions, DatabaseError> {
        let sql = format!(
            "INSERT INTO frontend_options (user_id, hide_finished_tasks) VALUES ($1, TRUE) \
             ON CONFLICT (user_id) DO UPDATE \
             SET hide_finished_tasks = NOT frontend_options.hide_finished_tasks, updated_at = now() \
             RETURNING {}",
            OPTION_COLUMNS
        );
        self.trace(&sql);
        let options = sqlx::query_as::<_, FrontendOptions>(&sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(options)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
