use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;

use crate::database::models::NewList;
use crate::error::ApiError;
use crate::forms::{FormData, FormPage, ListForm, RecordForm};
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::state::AppState;

use super::detail_url;

const ACTION: &str = "/new/";

#[derive(Debug, Serialize)]
pub struct NewListContext {
    pub action: &'static str,
}

/// GET /new/ - Empty list form
pub async fn get(Extension(_principal): Extension<Principal>) -> ApiResult<FormPage<NewListContext, ListForm>> {
    Ok(ApiResponse::success(FormPage::new(
        NewListContext { action: ACTION },
        ListForm::default(),
    )))
}

/// POST /new/ - Create a list authored by the principal
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Form(data): Form<FormData>,
) -> Result<Response, ApiError> {
    let form = ListForm::bind(&data);
    let title = match form.clean() {
        Ok(title) => title,
        Err(errors) => {
            return Ok(FormPage::with_errors(NewListContext { action: ACTION }, form, errors).rejected());
        }
    };

    // Author always comes from the session, whatever the body said
    let list = state
        .store
        .create_list(NewList {
            title,
            author: principal.id,
        })
        .await?;

    tracing::info!("Principal {} created list {}", principal.id, list.id);
    Ok(Redirect::to(&detail_url(list.id)).into_response())
}
