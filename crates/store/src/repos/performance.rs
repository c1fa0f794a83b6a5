//! Performance record repository trait.

use crate::error::StoreResult;
use crate::models::PerformanceRow;
use async_trait::async_trait;

/// Repository for monthly performance records.
#[async_trait]
pub trait PerformanceRepo: Send + Sync {
    /// Insert a record, replacing any existing record for the same
    /// `(district_code, period)`.
    async fn upsert_performance(&self, record: &PerformanceRow) -> StoreResult<()>;

    /// Most recent record for a district.
    async fn get_latest_performance(&self, code: &str) -> StoreResult<Option<PerformanceRow>>;

    /// Up to `limit` most recent records for a district, newest first.
    async fn get_recent_performance(
        &self,
        code: &str,
        limit: u32,
    ) -> StoreResult<Vec<PerformanceRow>>;

    /// Latest record of every district, ordered by district code.
    async fn get_latest_per_district(&self) -> StoreResult<Vec<PerformanceRow>>;

    /// Every stored record, ordered by district code then period.
    async fn list_all_performance(&self) -> StoreResult<Vec<PerformanceRow>>;
}
