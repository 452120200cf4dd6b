mod cleanup;
mod helpers;
mod lookup;
mod reader;
mod writer;

use crate::database::{with_retry, RetryPolicy};
use acumba_cache_application::ports::{
    CacheCleanupRepository, CacheStatsReader, ResponseCacheRepository,
};
use acumba_cache_domain::{
    config::DatabaseConfig, CacheEntry, CacheError, DailyStat, EndpointSummary, ResponseData,
    StorageSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use helpers::unavailable;
use sqlx::SqlitePool;
use tracing::{debug, instrument};
use writer::EntryRow;

/// SQLite store for cached responses and their daily statistics.
///
/// Lookups, writes and cleanup share the write pool; the statistics surface
/// reads through the read pool. Every operation is retried on BUSY/LOCKED
/// according to the configured [`RetryPolicy`] and reported as
/// [`CacheError::Unavailable`] once the budget is spent.
pub struct SqliteResponseCacheRepository {
    write_pool: SqlitePool,
    read_pool: SqlitePool,
    retry: RetryPolicy,
}

impl SqliteResponseCacheRepository {
    pub fn new(write_pool: SqlitePool, read_pool: SqlitePool, cfg: &DatabaseConfig) -> Self {
        Self {
            write_pool,
            read_pool,
            retry: RetryPolicy::from_config(cfg),
        }
    }

    /// Single pool for everything, default retry policy.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            write_pool: pool.clone(),
            read_pool: pool,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl ResponseCacheRepository for SqliteResponseCacheRepository {
    #[instrument(skip(self))]
    async fn lookup(
        &self,
        fingerprint: &str,
        endpoint_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResponseData>, CacheError> {
        with_retry(&self.retry, "lookup", || {
            lookup::lookup_once(&self.write_pool, fingerprint, endpoint_name, now)
        })
        .await
        .map_err(|e| unavailable("lookup", e))
    }

    #[instrument(skip(self, entry), fields(endpoint = %entry.endpoint_name))]
    async fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let row = EntryRow::from_entry(entry)?;

        with_retry(&self.retry, "store", || {
            writer::upsert_entry(&self.write_pool, &row)
        })
        .await
        .map_err(|e| unavailable("store", e))?;

        debug!(expires_at = %entry.expires_at, "Cache entry stored");
        Ok(())
    }
}

#[async_trait]
impl CacheCleanupRepository for SqliteResponseCacheRepository {
    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CacheError> {
        cleanup::delete_expired(&self.write_pool, &self.retry, now)
            .await
            .map_err(|e| unavailable("delete_expired", e))
    }

    async fn count_live_by_endpoint(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, u64)>, CacheError> {
        with_retry(&self.retry, "count_live_by_endpoint", || {
            cleanup::count_live_by_endpoint(&self.write_pool, now)
        })
        .await
        .map_err(|e| unavailable("count_live_by_endpoint", e))
    }

    async fn count_live(&self, now: DateTime<Utc>) -> Result<u64, CacheError> {
        with_retry(&self.retry, "count_live", || {
            cleanup::count_live(&self.write_pool, now)
        })
        .await
        .map_err(|e| unavailable("count_live", e))
    }

    #[instrument(skip(self))]
    async fn evict_from_endpoint(
        &self,
        endpoint_name: &str,
        count: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, CacheError> {
        with_retry(&self.retry, "evict_from_endpoint", || {
            cleanup::evict_from_endpoint(&self.write_pool, endpoint_name, count, now)
        })
        .await
        .map_err(|e| unavailable("evict_from_endpoint", e))
    }

    #[instrument(skip(self))]
    async fn evict_global(&self, count: u64, now: DateTime<Utc>) -> Result<u64, CacheError> {
        with_retry(&self.retry, "evict_global", || {
            cleanup::evict_global(&self.write_pool, count, now)
        })
        .await
        .map_err(|e| unavailable("evict_global", e))
    }

    #[instrument(skip(self))]
    async fn optimize(&self) -> Result<(), CacheError> {
        with_retry(&self.retry, "optimize", || cleanup::optimize(&self.write_pool))
            .await
            .map_err(|e| unavailable("optimize", e))
    }

    #[instrument(skip(self))]
    async fn delete_stats_before(&self, cutoff: NaiveDate) -> Result<u64, CacheError> {
        with_retry(&self.retry, "delete_stats_before", || {
            cleanup::delete_stats_before(&self.write_pool, cutoff)
        })
        .await
        .map_err(|e| unavailable("delete_stats_before", e))
    }
}

#[async_trait]
impl CacheStatsReader for SqliteResponseCacheRepository {
    async fn endpoint_summaries(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EndpointSummary>, CacheError> {
        with_retry(&self.retry, "endpoint_summaries", || {
            reader::endpoint_summaries(&self.read_pool, now)
        })
        .await
        .map_err(|e| unavailable("endpoint_summaries", e))
    }

    async fn daily_stats_since(&self, since: NaiveDate) -> Result<Vec<DailyStat>, CacheError> {
        with_retry(&self.retry, "daily_stats_since", || {
            reader::daily_stats_since(&self.read_pool, since)
        })
        .await
        .map_err(|e| unavailable("daily_stats_since", e))
    }

    async fn daily_stat(
        &self,
        endpoint_name: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyStat>, CacheError> {
        with_retry(&self.retry, "daily_stat", || {
            reader::daily_stat(&self.read_pool, endpoint_name, date)
        })
        .await
        .map_err(|e| unavailable("daily_stat", e))
    }

    async fn storage_summary(&self) -> Result<StorageSummary, CacheError> {
        with_retry(&self.retry, "storage_summary", || {
            reader::storage_summary(&self.read_pool)
        })
        .await
        .map_err(|e| unavailable("storage_summary", e))
    }

    async fn find_entry(&self, fingerprint: &str) -> Result<Option<CacheEntry>, CacheError> {
        with_retry(&self.retry, "find_entry", || {
            reader::find_entry(&self.read_pool, fingerprint)
        })
        .await
        .map_err(|e| unavailable("find_entry", e))
    }
}
