#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blog_api::auth::issue_token;
use blog_api::config::AppConfig;
use blog_api::database::MemoryConnector;
use reqwest::StatusCode;
use serde_json::Value;

pub const SECRET: &str = "integration-secret";
pub const BASE_PATH: &str = "/api/v1/blog";

/// In-process server backed by the memory store, on a free port
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: MemoryConnector,
    pub client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(&[]).await
    }

    pub async fn spawn_with(extra: &[(&str, &str)]) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;

        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("JWT_SECRET".into(), SECRET.into());
        vars.insert("API_ENABLE_REQUEST_LOGGING".into(), "false".into());
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }
        let config = AppConfig::from_map(&vars)?;

        let store = MemoryConnector::new();
        let app = blog_api::app(&config, Arc::new(store.clone()))?;

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            client: reqwest::Client::new(),
            handle,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// URL of a path under the blog base path ("" for the base itself)
    pub fn blog_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, BASE_PATH, path)
    }

    pub async fn create(&self, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.blog_url(""))
            .header("Authorization", token)
            .json(&body)
            .send()
            .await?;
        read(res).await
    }

    pub async fn update(&self, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .put(self.blog_url(""))
            .header("Authorization", token)
            .json(&body)
            .send()
            .await?;
        read(res).await
    }

    pub async fn get(&self, token: &str, path: &str) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .get(self.blog_url(path))
            .header("Authorization", token)
            .send()
            .await?;
        read(res).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn token_for(subject: i32) -> String {
    issue_token(subject, SECRET, Some(chrono::Duration::minutes(10))).expect("failed to sign token")
}

async fn read(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let text = res.text().await?;
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).with_context(|| format!("non-JSON body: {text}"))?
    };
    Ok((status, body))
}
