use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::handlers::RecordId;
use crate::middleware::Principal;
use crate::redirect;
use crate::services::ListService;
use crate::state::AppState;

/// POST /task/:id/toggle/ - Flip `done`, then back to the referring page
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let record = ListService::new(state.store.clone()).owned_task(&principal, id).await?;

    let task = state.store.toggle_task_done(record.task.id).await?;
    tracing::info!("Principal {} toggled task {} to done={}", principal.id, task.id, task.done);

    Ok(redirect::back(&headers, state.config.security.same_origin_redirects).into_response())
}
