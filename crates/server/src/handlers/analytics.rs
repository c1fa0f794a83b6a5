//! State-level analytics endpoints.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use rozgar_core::api::{StateSummaryResponse, StateTotalsView, TopDistrict, TopDistrictsResponse};
use rozgar_core::{PerformanceRecord, rank_top_districts, summarize_state};
use serde::Deserialize;

async fn latest_per_district(state: &AppState) -> ApiResult<Vec<PerformanceRecord>> {
    Ok(state
        .store
        .get_latest_per_district()
        .await?
        .into_iter()
        .map(PerformanceRecord::from)
        .collect())
}

/// GET /api/analytics/state-summary - Totals over each district's latest month.
pub async fn state_summary(State(state): State<AppState>) -> ApiResult<Json<StateSummaryResponse>> {
    let latest = latest_per_district(&state).await?;
    let totals = summarize_state(&latest);
    let total_districts = state.store.count_districts().await?;

    Ok(Json(StateSummaryResponse {
        total_districts: Some(total_districts),
        data: StateTotalsView::from(&totals),
    }))
}

/// Query parameters for the ranking.
#[derive(Debug, Deserialize)]
pub struct TopDistrictsQuery {
    pub limit: Option<String>,
}

/// GET /api/analytics/top-districts?limit= - Ranking by households employed.
///
/// A missing, non-numeric or zero limit uses the configured default.
pub async fn top_districts(
    State(state): State<AppState>,
    Query(query): Query<TopDistrictsQuery>,
) -> ApiResult<Json<TopDistrictsResponse>> {
    let requested = query
        .limit
        .as_deref()
        .and_then(|limit| limit.trim().parse::<usize>().ok());
    let limit = state.config.query.top_limit(requested);

    let latest = latest_per_district(&state).await?;
    let data = rank_top_districts(&latest, limit)
        .iter()
        .map(TopDistrict::from)
        .collect();
    Ok(Json(TopDistrictsResponse { data }))
}
