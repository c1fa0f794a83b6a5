//! Response cache repository trait.

use crate::error::StoreResult;
use crate::models::CacheEntryRow;
use async_trait::async_trait;
use time::OffsetDateTime;

/// Repository for cached API responses.
///
/// Entries past their expiry are never returned, whether or not the reaper
/// has removed them yet.
#[async_trait]
pub trait ResponseCacheRepo: Send + Sync {
    /// Get a live entry for `key` at `now`.
    async fn get_cached_response(
        &self,
        key: &str,
        now: OffsetDateTime,
    ) -> StoreResult<Option<CacheEntryRow>>;

    /// Upsert an entry. Overwrites payload and expiry of an existing key.
    async fn put_cached_response(
        &self,
        key: &str,
        payload: &str,
        expires_at: OffsetDateTime,
    ) -> StoreResult<()>;

    /// Remove entries expired at `now`. Returns the number removed.
    async fn delete_expired_cache_entries(&self, now: OffsetDateTime) -> StoreResult<u64>;
}
