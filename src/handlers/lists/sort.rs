use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::error::ApiError;
use crate::forms::{FormData, FormPage, RecordForm, SortForm};
use crate::handlers::RecordId;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

use super::{detail_url, ListContext};

fn sort_url(id: i64) -> String {
    format!("/{}/sort/", id)
}

/// GET /:id/sort/ - Criterion picker
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> ApiResult<FormPage<ListContext, SortForm>> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;
    let form = SortForm::from_list(&list);

    Ok(ApiResponse::success(FormPage::new(
        ListContext {
            action: sort_url(list.id),
            list,
        },
        form,
    )))
}

/// POST /:id/sort/ - Store the criterion; stored tasks are left as they are
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
    Form(data): Form<FormData>,
) -> Result<Response, ApiError> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;

    let form = SortForm::bind(&data);
    let criterion = match form.clean() {
        Ok(criterion) => criterion,
        Err(errors) => {
            let context = ListContext {
                action: sort_url(list.id),
                list,
            };
            return Ok(FormPage::with_errors(context, form, errors).rejected());
        }
    };

    let list = state.store.update_sort_criterion(list.id, criterion).await?;
    tracing::info!("Principal {} set list {} sort to {}", principal.id, list.id, criterion);

    Ok(Redirect::to(&detail_url(list.id)).into_response())
}
