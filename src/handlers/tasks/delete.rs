use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ApiError;
use crate::handlers::RecordId;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

use super::TaskContext;

/// GET /task/:id/delete/ - Confirmation page
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> ApiResult<TaskContext> {
    let record = ListService::new(state.store.clone()).owned_task(&principal, id).await?;

    Ok(ApiResponse::success(TaskContext {
        action: format!("/task/{}/delete/", record.task.id),
        task: record.task,
        list: record.list,
    }))
}

/// POST /task/:id/delete/
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    let record = ListService::new(state.store.clone()).owned_task(&principal, id).await?;

    state.store.delete_task(record.task.id).await?;
    tracing::info!(
        "Principal {} deleted task {} from list {}",
        principal.id,
        record.task.id,
        record.list.id
    );

    Ok(Redirect::to("/").into_response())
}
