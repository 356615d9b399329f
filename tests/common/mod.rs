#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use tasklists::auth::{generate_jwt, Claims};
use tasklists::config::AppConfig;
use tasklists::database::MemoryStore;
use tasklists::{app, AppState};

/// The real router served on an ephemeral port, backed by a fresh in-memory store
pub struct TestServer {
    pub base_url: String,
    pub config: AppConfig,
    pub client: reqwest::Client,
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(AppConfig::development()).await
}

pub async fn spawn_server_with(config: AppConfig) -> Result<TestServer> {
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind ephemeral port")?;
    let addr = listener.local_addr()?;

    // Lives as long as the test's runtime
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app(state)).await {
            tracing::error!("test server stopped: {}", e);
        }
    });

    // Redirects are asserted on, never followed
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        config,
        client,
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn user(&self, name: &str) -> Result<TestUser> {
        self.principal(name, false)
    }

    pub fn guest(&self) -> Result<TestUser> {
        self.principal("guest", true)
    }

    fn principal(&self, name: &str, guest: bool) -> Result<TestUser> {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, name, guest, 1);
        let token = generate_jwt(&self.config.security, &claims)?;
        Ok(TestUser { id, token })
    }

    pub async fn get(&self, path: &str, user: &TestUser) -> Result<reqwest::Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(&user.token).send().await?)
    }

    pub async fn post(&self, path: &str, user: &TestUser, form: &[(&str, &str)]) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(&user.token)
            .form(form)
            .send()
            .await?)
    }

    /// Create a list through the API and return its id
    pub async fn create_list(&self, user: &TestUser, title: &str) -> Result<i64> {
        let res = self.post("/new/", user, &[("title", title)]).await?;
        anyhow::ensure!(res.status() == reqwest::StatusCode::SEE_OTHER, "create failed: {}", res.status());
        let location = location(&res).context("missing Location")?;
        location
            .trim_matches('/')
            .parse()
            .with_context(|| format!("unexpected Location {}", location))
    }

    pub async fn page(&self, path: &str, user: &TestUser) -> Result<serde_json::Value> {
        let res = self.get(path, user).await?;
        anyhow::ensure!(res.status().is_success(), "GET {} failed: {}", path, res.status());
        Ok(res.json().await?)
    }
}

pub fn location(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
