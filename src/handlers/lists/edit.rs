use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::error::ApiError;
use crate::forms::{FormData, FormPage, ListForm, RecordForm};
use crate::handlers::RecordId;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

use super::{detail_url, ListContext};

fn edit_url(id: i64) -> String {
    format!("/{}/edit/", id)
}

/// GET /:id/edit/ - Title form pre-filled from the list
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
) -> ApiResult<FormPage<ListContext, ListForm>> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;
    let form = ListForm::from_list(&list);

    Ok(ApiResponse::success(FormPage::new(
        ListContext {
            action: edit_url(list.id),
            list,
        },
        form,
    )))
}

/// POST /:id/edit/ - Rename the list
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    RecordId(id): RecordId,
    Form(data): Form<FormData>,
) -> Result<Response, ApiError> {
    let list = ListService::new(state.store.clone()).owned_list(&principal, id).await?;

    let form = ListForm::bind(&data);
    let title = match form.clean() {
        Ok(title) => title,
        Err(errors) => {
            let context = ListContext {
                action: edit_url(list.id),
                list,
            };
            return Ok(FormPage::with_errors(context, form, errors).rejected());
        }
    };

    let list = state.store.update_list_title(list.id, &title).await?;
    tracing::info!("Principal {} renamed list {}", principal.id, list.id);

    Ok(Redirect::to(&detail_url(list.id)).into_response())
}
