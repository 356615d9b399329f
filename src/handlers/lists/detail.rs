use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;

use crate::database::models::{FrontendOptions, List, Task};
use crate::error::ApiError;
use crate::forms::{FormData, FormPage, RecordForm, TaskForm};
use crate::handlers::RecordId;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

use super::detail_url;

/// A list as its owner sees it: sorted, and filtered by their options
#[derive(Debug, Serialize)]
pub struct ListDetail {
    pub list: List,
    pub tasks: Vec<Task>,
    pub hidden_finished: usize,
    pub options: FrontendOptions,
    pub action: String,
}

async fn load_detail(state: &AppState, principal: &Principal, id: i64) -> Result<ListDetail, ApiError> {
    let list = ListService::new(state.store.clone()).owned_list(principal, id).await?;
    let options = state.store.frontend_options(principal.id).await?;

    let mut tasks = state.store.tasks_for_list(list.id).await?;
    list.sort_criterion.apply(&mut tasks);

    let total = tasks.len();
    if options.hide_finished_tasks {
        tasks.retain(|t| !t.done);
    }

    Ok(ListDetail {
        action: detail_url(list.id),
        hidden_finished: total - tasks.len(),
        list,
        tasks,
        options,
    })
}

/// GET /:id/ - List, its tasks and an empty task form
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> ApiResult<FormPage<ListDetail, TaskForm>> {
    let detail = load_detail(&state, &principal, id).await?;
    Ok(ApiResponse::success(FormPage::new(detail, TaskForm::default())))
}

/// POST /:id/ - Add a task to the list
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
    Form(data): Form<FormData>,
) -> Result<Response, ApiError> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;

    let form = TaskForm::bind(&data);
    let fields = match form.clean() {
        Ok(fields) => fields,
        Err(errors) => {
            let detail = load_detail(&state, &principal, id).await?;
            return Ok(FormPage::with_errors(detail, form, errors).rejected());
        }
    };

    // Parent comes from the path; `list`/`list_id` in the body are never read
    let task = state.store.create_task(list.id, fields).await?;
    tracing::info!("Principal {} added task {} to list {}", principal.id, task.id, list.id);

    Ok(Redirect::to(&detail_url(list.id)).into_response())
}
