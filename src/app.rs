use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{self, lists, options, tasks};
use crate::middleware::{guest_access_middleware, jwt_auth_middleware};
use crate::state::AppState;

/// Build the full router for `state`
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    // route_layer: the last layer added runs first, so JWT precedes the guest check
    let protected = Router::new()
        .merge(list_routes())
        .merge(task_routes())
        .merge(option_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), guest_access_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware));

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }

    router.with_state(state)
}

fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::index))
        .route("/new/", get(lists::new_form).post(lists::create))
        .route("/:id/", get(lists::show).post(lists::create_task))
        .route("/:id/edit/", get(lists::edit_form).post(lists::update))
        .route("/:id/delete/", get(lists::delete_confirm).post(lists::destroy))
        .route("/:id/sort/", get(lists::sort_form).post(lists::update_sort))
}

fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/task/:id/edit/", get(tasks::edit_form).post(tasks::update))
        .route("/task/:id/delete/", get(tasks::delete_confirm).post(tasks::destroy))
        .route("/task/:id/toggle/", post(tasks::toggle))
}

fn option_routes() -> Router<AppState> {
    Router::new().route(
        "/frontend-options/toggle-hide-finished/",
        post(options::toggle_hide_finished),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};

    use crate::config::AppConfig;
    use crate::testing::TestContext;

    #[tokio::test]
    async fn health_is_public() {
        let ctx = TestContext::new();
        let res = ctx.get("/health", None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["data"]["status"], "ok");
        assert_eq!(res.body["data"]["storage"], "memory");
    }

    #[tokio::test]
    async fn pages_require_a_token() {
        let ctx = TestContext::new();
        for path in ["/", "/new/", "/1/", "/1/edit/", "/task/1/edit/"] {
            let res = ctx.get(path, None).await;
            assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{}", path);
            assert_eq!(res.body["code"], "UNAUTHORIZED");
        }

        let res = ctx.post_form("/frontend-options/toggle-hide-finished/", None, &[]).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let ctx = TestContext::new();
        let mut other = AppConfig::development();
        other.security.jwt_secret = "some-other-secret".to_string();
        let stranger = TestContext::with_config(other).user("mallory");

        let res = ctx.get("/", Some(&stranger)).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_cookie_is_accepted() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice");
        ctx.list(&alice, "Groceries").await;

        let cookie = format!("theme=dark; token={}", alice.token);
        let res = ctx
            .post_form_with("/new/", None, &[("title", "Chores")], &[(header::COOKIE, cookie.as_str())])
            .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn guests_follow_the_guest_policy() {
        let ctx = TestContext::new();
        let guest = ctx.guest();
        assert_eq!(ctx.get("/", Some(&guest)).await.status, StatusCode::OK);

        let mut config = AppConfig::development();
        config.security.allow_guests = false;
        let locked = TestContext::with_config(config);
        let guest = locked.guest();
        let res = locked.get("/", Some(&guest)).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);

        let member = locked.user("alice");
        assert_eq!(locked.get("/", Some(&member)).await.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let ctx = TestContext::new();
        let alice = ctx.user("alice");
        let list = ctx.list(&alice, "Groceries").await;

        let res = ctx.get(&format!("/task/{}/toggle/", list.id), Some(&alice)).await;
        assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
