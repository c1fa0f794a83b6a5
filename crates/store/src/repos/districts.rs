//! District repository trait.

use crate::error::StoreResult;
use crate::models::DistrictRow;
use async_trait::async_trait;

/// Repository for district metadata.
#[async_trait]
pub trait DistrictRepo: Send + Sync {
    /// Insert a district, or replace the existing one with the same code.
    async fn upsert_district(&self, district: &DistrictRow) -> StoreResult<()>;

    /// Get a district by code.
    async fn get_district(&self, code: &str) -> StoreResult<Option<DistrictRow>>;

    /// List all districts sorted by name.
    async fn list_districts(&self) -> StoreResult<Vec<DistrictRow>>;

    /// Number of known districts.
    async fn count_districts(&self) -> StoreResult<i64>;
}
