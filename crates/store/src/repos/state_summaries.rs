//! State summary repository trait.

use crate::error::StoreResult;
use crate::models::StateSummaryRow;
use async_trait::async_trait;

/// Repository for precomputed state summaries.
#[async_trait]
pub trait StateSummaryRepo: Send + Sync {
    /// Insert or replace the summary for `(state_name, period)`.
    async fn upsert_state_summary(&self, summary: &StateSummaryRow) -> StoreResult<()>;

    /// Summary with the most recent period for a state.
    async fn get_latest_state_summary(
        &self,
        state_name: &str,
    ) -> StoreResult<Option<StateSummaryRow>>;
}
