use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Cookie consulted when no Authorization header is present
pub const TOKEN_COOKIE: &str = "token";

/// The user (or guest) making the request, extracted from the JWT
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub guest: bool,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            guest: claims.guest,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects the `Principal`
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&state.config.security, &token).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::from(e)
    })?;

    let principal = Principal::from(claims);
    tracing::debug!("Authenticated {} ({}{})", principal.name, principal.id, if principal.guest { ", guest" } else { "" });
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract the JWT from `Authorization: Bearer` or, failing that, the token cookie
pub fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| "Invalid Authorization header format".to_string())?;

        return match auth_str.strip_prefix("Bearer ") {
            Some(token) if token.trim().is_empty() => Err("Empty JWT token".to_string()),
            Some(token) => Ok(token.trim().to_string()),
            None => Err("Authorization header must use Bearer token format".to_string()),
        };
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| "Missing Authorization header".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn reads_bearer_token() {
        let map = headers(&[(header::AUTHORIZATION, "Bearer abc.def.ghi")]);
        assert_eq!(extract_jwt_from_headers(&map), Ok("abc.def.ghi".to_string()));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        let basic = headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")]);
        assert!(extract_jwt_from_headers(&basic).is_err());

        let empty = headers(&[(header::AUTHORIZATION, "Bearer   ")]);
        assert_eq!(extract_jwt_from_headers(&empty), Err("Empty JWT token".to_string()));
    }

    #[test]
    fn falls_back_to_cookie() {
        let map = headers(&[(header::COOKIE, "theme=dark; token=abc.def.ghi")]);
        assert_eq!(extract_jwt_from_headers(&map), Ok("abc.def.ghi".to_string()));
    }

    #[test]
    fn header_wins_over_cookie() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer from-header"),
            (header::COOKIE, "token=from-cookie"),
        ]);
        assert_eq!(extract_jwt_from_headers(&map), Ok("from-header".to_string()));
    }

    #[test]
    fn missing_credentials() {
        let map = headers(&[(header::COOKIE, "theme=dark")]);
        assert_eq!(
            extract_jwt_from_headers(&map),
            Err("Missing Authorization header".to_string())
        );
    }
}
