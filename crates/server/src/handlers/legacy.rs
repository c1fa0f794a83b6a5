//! Record-level endpoints kept for older dashboard builds.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use rozgar_core::{PerformanceRecord, RecordTotals, state_wide_totals};
use serde::Deserialize;

/// Default number of records for `/api/district/{code}/performance`.
const DEFAULT_PERFORMANCE_LIMIT: u32 = 12;

/// GET /api/district/{code}/latest - Full latest record.
pub async fn latest_record(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<PerformanceRecord>> {
    let record = state
        .store
        .get_latest_performance(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("No data found".to_string()))?;
    Ok(Json(record.into()))
}

#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    pub limit: Option<String>,
}

/// GET /api/district/{code}/performance?limit= - Recent records, newest first.
pub async fn recent_records(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<PerformanceQuery>,
) -> ApiResult<Json<Vec<PerformanceRecord>>> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|limit| limit.trim().parse::<u32>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_PERFORMANCE_LIMIT);

    let records = state
        .store
        .get_recent_performance(&code, limit)
        .await?
        .into_iter()
        .map(PerformanceRecord::from)
        .collect();
    Ok(Json(records))
}

/// GET /api/state/stats - Totals over every stored record.
pub async fn state_stats(State(state): State<AppState>) -> ApiResult<Json<RecordTotals>> {
    let records: Vec<PerformanceRecord> = state
        .store
        .list_all_performance()
        .await?
        .into_iter()
        .map(PerformanceRecord::from)
        .collect();
    Ok(Json(state_wide_totals(&records)))
}
