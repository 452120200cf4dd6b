use acumba_cache_domain::{CacheEntry, CacheError, ResponseData};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ResponseCacheRepository: Send + Sync {
    /// Returns the payload of the live entry for `fingerprint`, if any.
    ///
    /// A hit bumps `hit_count` and `last_accessed_at`; either outcome is
    /// counted in the daily statistics of `endpoint_name` for `now`'s date,
    /// in the same transaction as the entry update.
    async fn lookup(
        &self,
        fingerprint: &str,
        endpoint_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResponseData>, CacheError>;

    /// Inserts the entry or replaces the one with the same fingerprint,
    /// resetting its timestamps and hit count.
    async fn store(&self, entry: &CacheEntry) -> Result<(), CacheError>;
}
