use acumba_cache_domain::{CacheEntry, CacheError, DailyStat, EndpointSummary, StorageSummary};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Read-only statistics surface for reporting tools. Nothing here records
/// hits or misses.
#[async_trait]
pub trait CacheStatsReader: Send + Sync {
    /// One summary per endpoint, ordered by total entries descending.
    async fn endpoint_summaries(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EndpointSummary>, CacheError>;

    /// Daily stats on or after `since`, newest first.
    async fn daily_stats_since(&self, since: NaiveDate) -> Result<Vec<DailyStat>, CacheError>;

    async fn daily_stat(
        &self,
        endpoint_name: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyStat>, CacheError>;

    async fn storage_summary(&self) -> Result<StorageSummary, CacheError>;

    async fn find_entry(&self, fingerprint: &str) -> Result<Option<CacheEntry>, CacheError>;
}
