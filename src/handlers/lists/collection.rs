use axum::extract::{Extension, State};
use serde::Serialize;

use crate::database::models::List;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::services::ListService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListIndexPage {
    pub lists: Vec<List>,
}

/// GET / - The principal's own lists
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<ListIndexPage> {
    let lists = ListService::new(state.store.clone()).lists_for(&principal).await?;
    Ok(ApiResponse::success(ListIndexPage { lists }))
}
