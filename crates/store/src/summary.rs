//! State summary refresh job.

use crate::error::{StoreError, StoreResult};
use crate::models::StateSummaryRow;
use crate::store::DashboardStore;
use rozgar_core::{PerformanceRecord, financial_year_for, summarize_state};
use time::OffsetDateTime;

/// Recompute the state summary from the latest record of every district and
/// store it under the most recent reporting period.
///
/// Returns `NotFound` when no performance records exist.
pub async fn refresh_state_summary(
    store: &dyn DashboardStore,
    state_name: &str,
    state_code: Option<&str>,
) -> StoreResult<StateSummaryRow> {
    let latest: Vec<PerformanceRecord> = store
        .get_latest_per_district()
        .await?
        .into_iter()
        .map(PerformanceRecord::from)
        .collect();

    let Some(period) = latest.iter().map(|r| r.period).max() else {
        return Err(StoreError::NotFound(format!(
            "no performance records for {state_name}"
        )));
    };

    let totals = summarize_state(&latest);
    let summary = StateSummaryRow {
        state_name: state_name.to_string(),
        state_code: state_code.map(str::to_string),
        financial_year: financial_year_for(period),
        period,
        total_districts: store.count_districts().await?,
        total_person_days: totals.total_person_days,
        total_expenditure: totals.total_expenditure,
        total_works: totals.total_works,
        completed_works: totals.completed_works,
        avg_women_participation: totals.avg_women_participation,
        last_updated: OffsetDateTime::now_utc(),
    };

    store.upsert_state_summary(&summary).await?;
    tracing::info!(
        state = state_name,
        period = %summary.period,
        districts_reporting = totals.districts_reporting,
        total_person_days = summary.total_person_days,
        "Refreshed state summary"
    );
    Ok(summary)
}
