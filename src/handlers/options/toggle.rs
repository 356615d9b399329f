use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::middleware::Principal;
use crate::redirect;
use crate::state::AppState;

/// POST /frontend-options/toggle-hide-finished/
///
/// Acts on the caller's own options row, creating it on first use. There is
/// no id in the path, so the only record reachable is the caller's.
pub async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let options = state.store.toggle_hide_finished(principal.id).await?;

    tracing::info!(
        "Principal {} set hide_finished_tasks={}",
        principal.id,
        options.hide_finished_tasks
    );

    Ok(redirect::back(&headers, state.config.security.same_origin_redirects).into_response())
}
