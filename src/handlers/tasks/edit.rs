use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::database::models::TaskWithList;
use crate::error::ApiError;
use crate::forms::{FormData, FormPage, RecordForm, TaskForm};
use crate::handlers::RecordId;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

use super::TaskContext;

fn context(record: TaskWithList) -> TaskContext {
    TaskContext {
        action: format!("/task/{}/edit/", record.task.id),
        task: record.task,
        list: record.list,
    }
}

/// GET /task/:id/edit/ - Task form pre-filled from the task
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> ApiResult<FormPage<TaskContext, TaskForm>> {
    let record = ListService::new(state.store.clone()).owned_task(&principal, id).await?;
    let form = TaskForm::from_task(&record.task);
    Ok(ApiResponse::success(FormPage::new(context(record), form)))
}

/// POST /task/:id/edit/ - Update description and done; the parent list stays put
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
    Form(data): Form<FormData>,
) -> Result<Response, ApiError> {
    let record = ListService::new(state.store.clone()).owned_task(&principal, id).await?;

    let form = TaskForm::bind(&data);
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => return Ok(FormPage::with_errors(context(record), form, errors).rejected()),
    };

    let task = state.store.update_task(record.task.id, fields).await?;
    tracing::info!("Principal {} updated task {}", principal.id, task.id);

    Ok(Redirect::to("/").into_response())
}
