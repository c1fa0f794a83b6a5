//! Server test utilities.

use super::store::CountingStore;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use rozgar_core::config::AppConfig;
use rozgar_store::{DashboardStore, SqliteStore, seed_demo};
use rozgar_server::{AppState, create_router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use time::OffsetDateTime;
use tower::ServiceExt;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub store: Arc<CountingStore>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Server over the demo data set.
    pub async fn seeded() -> Self {
        Self::build(true, |_| {}).await
    }

    /// Server over an empty store.
    pub async fn empty() -> Self {
        Self::build(false, |_| {}).await
    }

    /// Seeded server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        Self::build(true, modifier).await
    }

    async fn build<F>(seed: bool, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let sqlite: Arc<dyn DashboardStore> = Arc::new(
            SqliteStore::new(temp_dir.path().join("rozgar.db"))
                .await
                .expect("Failed to create store"),
        );

        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        if seed {
            seed_demo(sqlite.as_ref(), &config.query.state_name)
                .await
                .expect("Failed to seed demo data");
        }

        let store = Arc::new(CountingStore::new(sqlite));
        let state = AppState::new(config, store.clone());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Issue a GET and return status, headers and raw body.
    pub async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body)
    }

    /// Issue a GET and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.get(uri).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Wait until the detached cache write for `key` has landed.
    pub async fn wait_for_cache_entry(&self, key: &str) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let entry = self
                .state
                .store
                .get_cached_response(key, OffsetDateTime::now_utc())
                .await
                .unwrap();
            if entry.is_some() {
                return;
            }
            if tokio::time::Instant::now() > deadline {
                panic!("cache entry for {key} was not written in time");
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

/// Header value as a string, if present.
#[allow(dead_code)]
pub fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
