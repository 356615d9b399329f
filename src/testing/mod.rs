use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;
use crate::database::models::{List, NewList, Task, TaskFields};
use crate::database::{MemoryStore, SharedStore};
use crate::middleware::Principal;
use crate::state::AppState;

/// Router over a fresh in-memory store, driven with `oneshot`
pub struct TestContext {
    pub state: AppState,
    router: Router,
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub principal: Principal,
    pub token: String,
}

/// Status, headers and JSON body (Null when the body is empty)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::development())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let state = AppState::new(store, config);
        let router = crate::app(state.clone());
        Self { state, router }
    }

    pub fn store(&self) -> &SharedStore {
        &self.state.store
    }

    pub fn user(&self, name: &str) -> TestUser {
        self.principal(name, false)
    }

    pub fn guest(&self) -> TestUser {
        self.principal("guest", true)
    }

    fn principal(&self, name: &str, guest: bool) -> TestUser {
        let claims = Claims::new(Uuid::new_v4(), name, guest, 1);
        let token = generate_jwt(&self.state.config.security, &claims).expect("test token");
        TestUser {
            principal: Principal::from(claims),
            token,
        }
    }

    /// Seed a list directly in the store
    pub async fn list(&self, owner: &TestUser, title: &str) -> List {
        self.store()
            .create_list(NewList {
                title: title.to_string(),
                author: owner.principal.id,
            })
            .await
            .expect("seed list")
    }

    pub async fn task(&self, list: &List, description: &str, done: bool) -> Task {
        self.store()
            .create_task(
                list.id,
                TaskFields {
                    description: description.to_string(),
                    done,
                },
            )
            .await
            .expect("seed task")
    }

    pub async fn get(&self, path: &str, user: Option<&TestUser>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user.token));
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    pub async fn post_form(&self, path: &str, user: Option<&TestUser>, fields: &[(&str, &str)]) -> TestResponse {
        self.post_form_with(path, user, fields, &[]).await
    }

    /// POST a urlencoded form with extra request headers (e.g. Referer)
    pub async fn post_form_with(
        &self,
        path: &str,
        user: Option<&TestUser>,
        fields: &[(&str, &str)],
        extra: &[(header::HeaderName, &str)],
    ) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user.token));
        }
        for (name, value) in extra {
            builder = builder.header(name, *value);
        }
        self.send(builder.body(Body::from(body)).expect("request")).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, headers, body }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
