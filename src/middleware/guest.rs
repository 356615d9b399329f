use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::state::AppState;

use super::auth::Principal;

/// Second link of the access chain: guests pass only while guest sessions are enabled
pub async fn guest_access_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required before guest validation"))?;

    check_guest_allowed(principal, &state.config.security)?;

    Ok(next.run(request).await)
}

pub fn check_guest_allowed(principal: &Principal, security: &SecurityConfig) -> Result<(), ApiError> {
    if principal.guest && !security.allow_guests {
        tracing::warn!("Guest session {} refused: guest access disabled", principal.id);
        return Err(ApiError::unauthorized("Guest sessions are disabled; please sign in"));
    }
    Ok(())
}
