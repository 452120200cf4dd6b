use acumba_cache_domain::CacheError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait CacheCleanupRepository: Send + Sync {
    /// Deletes entries with `expires_at <= now`, batch by batch.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CacheError>;

    /// Live entry count per endpoint.
    async fn count_live_by_endpoint(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, u64)>, CacheError>;

    async fn count_live(&self, now: DateTime<Utc>) -> Result<u64, CacheError>;

    /// Evicts up to `count` live entries of one endpoint in eviction order:
    /// least recently accessed, then lowest hit count, then oldest, then
    /// fingerprint.
    async fn evict_from_endpoint(
        &self,
        endpoint_name: &str,
        count: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, CacheError>;

    /// Same eviction order as [`Self::evict_from_endpoint`], across all
    /// endpoints.
    async fn evict_global(&self, count: u64, now: DateTime<Utc>) -> Result<u64, CacheError>;

    /// Checkpoints the WAL, then VACUUM and ANALYZE.
    async fn optimize(&self) -> Result<(), CacheError>;

    /// Deletes daily statistics strictly older than `cutoff`.
    async fn delete_stats_before(&self, cutoff: NaiveDate) -> Result<u64, CacheError>;
}
