//! Store wrapper that counts aggregation queries and can fail cache access.

use async_trait::async_trait;
use rozgar_store::models::{CacheEntryRow, DistrictRow, PerformanceRow, StateSummaryRow};
use rozgar_store::repos::{DistrictRepo, PerformanceRepo, ResponseCacheRepo, StateSummaryRepo};
use rozgar_store::{DashboardStore, StoreError, StoreResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use time::OffsetDateTime;

/// Delegating store used by server tests.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct CountingStore {
    inner: Arc<dyn DashboardStore>,
    latest_per_district_calls: AtomicUsize,
    fail_cache_reads: AtomicBool,
    fail_cache_writes: AtomicBool,
    fail_health_check: AtomicBool,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn new(inner: Arc<dyn DashboardStore>) -> Self {
        Self {
            inner,
            latest_per_district_calls: AtomicUsize::new(0),
            fail_cache_reads: AtomicBool::new(false),
            fail_cache_writes: AtomicBool::new(false),
            fail_health_check: AtomicBool::new(false),
        }
    }

    /// Number of latest-per-district queries issued so far.
    pub fn latest_per_district_calls(&self) -> usize {
        self.latest_per_district_calls.load(Ordering::SeqCst)
    }

    pub fn fail_cache_reads(&self, fail: bool) {
        self.fail_cache_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_cache_writes(&self, fail: bool) {
        self.fail_cache_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_health_check(&self, fail: bool) {
        self.fail_health_check.store(fail, Ordering::SeqCst);
    }
}

fn injected(what: &str) -> StoreError {
    StoreError::Internal(format!("injected {what} failure"))
}

#[async_trait]
impl DistrictRepo for CountingStore {
    async fn upsert_district(&self, district: &DistrictRow) -> StoreResult<()> {
        self.inner.upsert_district(district).await
    }

    async fn get_district(&self, code: &str) -> StoreResult<Option<DistrictRow>> {
        self.inner.get_district(code).await
    }

    async fn list_districts(&self) -> StoreResult<Vec<DistrictRow>> {
        self.inner.list_districts().await
    }

    async fn count_districts(&self) -> StoreResult<i64> {
        self.inner.count_districts().await
    }
}

#[async_trait]
impl PerformanceRepo for CountingStore {
    async fn upsert_performance(&self, record: &PerformanceRow) -> StoreResult<()> {
        self.inner.upsert_performance(record).await
    }

    async fn get_latest_performance(&self, code: &str) -> StoreResult<Option<PerformanceRow>> {
        self.inner.get_latest_performance(code).await
    }

    async fn get_recent_performance(
        &self,
        code: &str,
        limit: u32,
    ) -> StoreResult<Vec<PerformanceRow>> {
        self.inner.get_recent_performance(code, limit).await
    }

    async fn get_latest_per_district(&self) -> StoreResult<Vec<PerformanceRow>> {
        self.latest_per_district_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_latest_per_district().await
    }

    async fn list_all_performance(&self) -> StoreResult<Vec<PerformanceRow>> {
        self.inner.list_all_performance().await
    }
}

#[async_trait]
impl StateSummaryRepo for CountingStore {
    async fn upsert_state_summary(&self, summary: &StateSummaryRow) -> StoreResult<()> {
        self.inner.upsert_state_summary(summary).await
    }

    async fn get_latest_state_summary(
        &self,
        state_name: &str,
    ) -> StoreResult<Option<StateSummaryRow>> {
        self.inner.get_latest_state_summary(state_name).await
    }
}

#[async_trait]
impl ResponseCacheRepo for CountingStore {
    async fn get_cached_response(
        &self,
        key: &str,
        now: OffsetDateTime,
    ) -> StoreResult<Option<CacheEntryRow>> {
        if self.fail_cache_reads.load(Ordering::SeqCst) {
            return Err(injected("cache read"));
        }
        self.inner.get_cached_response(key, now).await
    }

    async fn put_cached_response(
        &self,
        key: &str,
        payload: &str,
        expires_at: OffsetDateTime,
    ) -> StoreResult<()> {
        if self.fail_cache_writes.load(Ordering::SeqCst) {
            return Err(injected("cache write"));
        }
        self.inner.put_cached_response(key, payload, expires_at).await
    }

    async fn delete_expired_cache_entries(&self, now: OffsetDateTime) -> StoreResult<u64> {
        self.inner.delete_expired_cache_entries(now).await
    }
}

#[async_trait]
impl DashboardStore for CountingStore {
    async fn migrate(&self) -> StoreResult<()> {
        self.inner.migrate().await
    }

    async fn health_check(&self) -> StoreResult<()> {
        if self.fail_health_check.load(Ordering::SeqCst) {
            return Err(injected("health check"));
        }
        self.inner.health_check().await
    }
}
