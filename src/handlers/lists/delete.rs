use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use crate::database::models::List;
use crate::error::ApiError;
use crate::handlers::RecordId;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteListPage {
    pub list: List,
    pub task_count: usize,
    pub action: String,
}

/// GET /:id/delete/ - Confirmation page
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> ApiResult<DeleteListPage> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;
    let task_count = state.store.tasks_for_list(list.id).await?.len();

    Ok(ApiResponse::success(DeleteListPage {
        action: format!("/{}/delete/", list.id),
        list,
        task_count,
    }))
}

/// POST /:id/delete/ - Delete the list and its tasks
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;

    state.store.delete_list(list.id).await?;
    tracing::info!("Principal {} deleted list {}", principal.id, list.id);

    Ok(Redirect::to("/").into_response())
}
