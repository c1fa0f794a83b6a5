//! Prometheus metrics for the Rozgar server.
//!
//! The `/metrics` endpoint is unauthenticated; it exposes only aggregate cache
//! counters.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static CACHE_HITS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rozgar_cache_hits_total",
        "Total number of responses served from the response cache",
    )
    .expect("metric creation failed")
});

pub static CACHE_MISSES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rozgar_cache_misses_total",
        "Total number of cacheable requests that ran the handler",
    )
    .expect("metric creation failed")
});

pub static CACHE_WRITE_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rozgar_cache_write_failures_total",
        "Total number of failed response cache writes",
    )
    .expect("metric creation failed")
});

pub static CACHE_ENTRIES_REAPED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "rozgar_cache_entries_reaped_total",
        "Total number of expired cache entries removed by the reaper",
    )
    .expect("metric creation failed")
});

static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
///
/// This function is idempotent - subsequent calls after the first are no-ops.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        for counter in [
            &CACHE_HITS,
            &CACHE_MISSES,
            &CACHE_WRITE_FAILURES,
            &CACHE_ENTRIES_REAPED,
        ] {
            REGISTRY
                .register(Box::new(IntCounter::clone(counter)))
                .expect("metric registration failed");
        }
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}
