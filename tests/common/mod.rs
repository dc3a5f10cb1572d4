//! Common test utilities and helpers
//!
//! Every integration test talks to a `wiremock` server standing in for the
//! backend, mounted under `/api` like the real deployment.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use paper_killer::client::{
    ApiClient, MemoryTokenStore, RedirectQueue, SessionManager, SessionStore, TokenStore,
};
use paper_killer::shared::{AppConfig, AppConfigBuilder};
use serde_json::{json, Value};
use wiremock::MockServer;

/// A client wired to a fresh mock backend.
pub struct TestApp {
    pub server: MockServer,
    pub storage: Arc<MemoryTokenStore>,
    pub redirects: Arc<RedirectQueue>,
    pub client: ApiClient,
    pub auth: SessionManager,
}

impl TestApp {
    /// Start signed out.
    pub async fn new() -> Self {
        Self::with_storage(MemoryTokenStore::new()).await
    }

    /// Start with a token already persisted, as after a previous run.
    pub async fn signed_in(token: &str) -> Self {
        Self::with_storage(MemoryTokenStore::with_token(token)).await
    }

    /// Start signed out with extra configuration applied on top of the
    /// test defaults.
    pub async fn with_config(configure: impl FnOnce(AppConfigBuilder) -> AppConfigBuilder) -> Self {
        Self::build(MemoryTokenStore::new(), configure).await
    }

    async fn with_storage(storage: MemoryTokenStore) -> Self {
        Self::build(storage, |builder| builder).await
    }

    async fn build(
        storage: MemoryTokenStore,
        configure: impl FnOnce(AppConfigBuilder) -> AppConfigBuilder,
    ) -> Self {
        let server = MockServer::start().await;
        let builder = AppConfig::builder()
            .server_url(format!("{}/api", server.uri()))
            .timeout(Duration::from_secs(2));
        let config = configure(builder).build().unwrap();

        let storage = Arc::new(storage);
        let session = SessionStore::restore(storage.clone());
        let redirects = Arc::new(RedirectQueue::new());
        let client = ApiClient::new(&config, session, redirects.clone()).unwrap();
        let auth = SessionManager::new(client.clone(), &config);

        Self {
            server,
            storage,
            redirects,
            client,
            auth,
        }
    }

    pub fn persisted_token(&self) -> Option<String> {
        self.storage.load().unwrap()
    }

    /// `Authorization` header of every request the backend saw, in order.
    pub async fn auth_headers(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                request
                    .headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }

    pub async fn request_count(&self) -> usize {
        self.server.received_requests().await.unwrap_or_default().len()
    }
}

pub fn paper_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "abstract": "An abstract",
        "authors": "A. Author",
        "keywords": "nlp, transformers",
        "status": "draft",
        "tags": ["nlp"],
        "is_favorite": false,
        "created_at": "2024-03-01T10:00:00"
    })
}

pub fn unauthorized_body() -> Value {
    json!({ "detail": "Could not validate credentials" })
}
