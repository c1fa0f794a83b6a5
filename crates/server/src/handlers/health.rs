//! Service index and health check.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use rozgar_core::api::{HealthResponse, IndexResponse};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const ENDPOINTS: [&str; 11] = [
    "/api/health",
    "/api/districts",
    "/api/districts/{code}/summary",
    "/api/districts/{code}/historical",
    "/api/districts/nearby",
    "/api/analytics/state-summary",
    "/api/analytics/top-districts",
    "/api/district/{code}/latest",
    "/api/district/{code}/performance",
    "/api/state/stats",
    "/metrics",
];

/// GET / - Service description.
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    let endpoints = ENDPOINTS
        .iter()
        .filter(|path| state.config.server.metrics_enabled || **path != "/metrics")
        .map(|path| path.to_string())
        .collect();

    Json(IndexResponse {
        message: "MGNREGA Dashboard API".to_string(),
        status: "running".to_string(),
        endpoints,
    })
}

/// GET /api/health - Liveness plus store connectivity.
///
/// Always answers 200; a failing store is reported as `"disconnected"`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.health_check().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            "disconnected"
        }
    };

    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp,
        database: database.to_string(),
    })
}
