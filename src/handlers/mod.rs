// handlers/mod.rs - Route handlers
//
// Public: /health only. Everything else sits behind the access chain
// (JWT -> guest policy) and runs the ownership guard inside the handler,
// before touching any record.
//
// src/handlers/
// ├── health.rs        GET /health
// ├── lists/           /, /new/, /:id/, /:id/edit/, /:id/delete/, /:id/sort/
// ├── tasks/           /task/:id/edit/, /task/:id/delete/, /task/:id/toggle/
// └── options/         /frontend-options/toggle-hide-finished/

pub mod health;
pub mod lists;
pub mod options;
pub mod tasks;

pub use health::health;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::ApiError;

/// Numeric `:id` path segment. Anything that does not parse as an id is a
/// NotFound, like an id with no record behind it.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(RecordId(id))
    }
}
