//! Response cache decorator and expired-entry reaper.
//!
//! [`cached`] wraps a GET handler so that a successful JSON body is stored
//! under the request's path and query, then served verbatim until it expires.
//! The cache never fails a request: read errors count as a miss and writes
//! happen on a detached task.

use crate::error::ApiError;
use crate::metrics::{CACHE_ENTRIES_REAPED, CACHE_HITS, CACHE_MISSES, CACHE_WRITE_FAILURES};
use crate::state::AppState;
use axum::body::{Body, Bytes, HttpBody};
use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use rozgar_store::DashboardStore;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

/// Header reporting whether a response came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Largest response body the cache will buffer. Larger or unsized bodies
/// pass through uncached.
const MAX_CACHED_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Per-route cache settings.
#[derive(Clone)]
struct ResponseCache {
    store: Arc<dyn DashboardStore>,
    ttl: Duration,
    enabled: bool,
}

/// Serve `handler` on GET through the response cache with the given TTL.
pub fn cached<H, T>(handler: H, ttl: Duration, state: &AppState) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    let cache = ResponseCache {
        store: state.store.clone(),
        ttl,
        enabled: state.config.cache.enabled,
    };
    get(handler).layer(middleware::from_fn_with_state(cache, serve_cached))
}

/// Cache key for a request: path plus query string, as received.
pub fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

async fn serve_cached(State(cache): State<ResponseCache>, request: Request, next: Next) -> Response {
    if !cache.enabled {
        return next.run(request).await;
    }

    let key = cache_key(request.uri());
    match cache
        .store
        .get_cached_response(&key, OffsetDateTime::now_utc())
        .await
    {
        Ok(Some(entry)) => {
            CACHE_HITS.inc();
            tracing::debug!(cache_key = %key, "Serving from cache");
            return json_response(Bytes::from(entry.payload), "HIT");
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(cache_key = %key, error = %e, "Cache read failed, treating as miss");
        }
    }
    CACHE_MISSES.inc();

    let response = next.run(request).await;
    if response.status() != StatusCode::OK || !is_json(&response) {
        return response;
    }

    let within_limit = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_CACHED_BODY_BYTES as u64);
    if !within_limit {
        tracing::debug!(cache_key = %key, "Response body too large or unsized, not caching");
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_CACHED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::Internal(format!("failed to buffer response body: {e}"))
                .into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(payload) => spawn_cache_write(&cache, key, payload.to_string()),
        Err(e) => tracing::warn!(cache_key = %key, error = %e, "Response body is not UTF-8, not caching"),
    }

    parts
        .headers
        .insert(CACHE_STATUS_HEADER, HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}

fn spawn_cache_write(cache: &ResponseCache, key: String, payload: String) {
    let store = cache.store.clone();
    let expires_at = OffsetDateTime::now_utc() + cache.ttl;
    tokio::spawn(async move {
        if let Err(e) = store.put_cached_response(&key, &payload, expires_at).await {
            CACHE_WRITE_FAILURES.inc();
            tracing::warn!(cache_key = %key, error = %e, "Failed to write response cache");
        }
    });
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn json_response(body: Bytes, cache_status: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (
                axum::http::HeaderName::from_static(CACHE_STATUS_HEADER),
                HeaderValue::from_static(cache_status),
            ),
        ],
        body,
    )
        .into_response()
}

/// Spawn the background task that deletes expired cache entries.
pub fn spawn_cache_reaper(
    store: Arc<dyn DashboardStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            match store
                .delete_expired_cache_entries(OffsetDateTime::now_utc())
                .await
            {
                Ok(0) => {}
                Ok(removed) => {
                    CACHE_ENTRIES_REAPED.inc_by(removed);
                    tracing::info!(removed = removed, "Cache reaper removed expired entries");
                }
                Err(e) => tracing::warn!(error = %e, "Cache reaper failed"),
            }
        }
    })
}
