use acumba_cache_application::ports::{
    CacheCleanupRepository, CacheMaintenancePort, CleanupOutcome, OptimizeOutcome,
};
use acumba_cache_domain::CacheError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockCacheMaintenancePort {
    cleanup_call_count: Arc<AtomicU64>,
    optimize_call_count: Arc<AtomicU64>,
    should_fail_cleanup: Arc<RwLock<bool>>,
    should_fail_optimize: Arc<RwLock<bool>>,
    cleanup_outcome: Arc<RwLock<CleanupOutcome>>,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            cleanup_call_count: Arc::new(AtomicU64::new(0)),
            optimize_call_count: Arc::new(AtomicU64::new(0)),
            should_fail_cleanup: Arc::new(RwLock::new(false)),
            should_fail_optimize: Arc::new(RwLock::new(false)),
            cleanup_outcome: Arc::new(RwLock::new(CleanupOutcome::default())),
        }
    }

    pub fn with_cleanup_outcome(mut self, outcome: CleanupOutcome) -> Self {
        self.cleanup_outcome = Arc::new(RwLock::new(outcome));
        self
    }

    pub fn cleanup_call_count(&self) -> u64 {
        self.cleanup_call_count.load(Ordering::Relaxed)
    }

    pub fn optimize_call_count(&self) -> u64 {
        self.optimize_call_count.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail_cleanup(&self, fail: bool) {
        *self.should_fail_cleanup.write().await = fail;
    }

    pub async fn set_should_fail_optimize(&self, fail: bool) {
        *self.should_fail_optimize.write().await = fail;
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_cleanup_cycle(&self) -> Result<CleanupOutcome, CacheError> {
        self.cleanup_call_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail_cleanup.read().await {
            return Err(CacheError::Unavailable("mock cleanup failure".into()));
        }
        Ok(self.cleanup_outcome.read().await.clone())
    }

    async fn run_optimize_cycle(&self) -> Result<OptimizeOutcome, CacheError> {
        self.optimize_call_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail_optimize.read().await {
            return Err(CacheError::Unavailable("mock optimize failure".into()));
        }
        Ok(OptimizeOutcome {
            size_before_bytes: 8_192,
            size_after_bytes: 4_096,
        })
    }
}

/// Records stats pruning; the entry-related operations are inert.
pub struct MockStatsRepository {
    stat_dates: Arc<RwLock<Vec<NaiveDate>>>,
    prune_call_count: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockStatsRepository {
    pub fn new() -> Self {
        Self {
            stat_dates: Arc::new(RwLock::new(Vec::new())),
            prune_call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn add_stat_days_ago(&self, today: NaiveDate, days: u64) {
        let date = today
            .checked_sub_days(chrono::Days::new(days))
            .unwrap();
        self.stat_dates.write().await.push(date);
    }

    pub async fn count(&self) -> usize {
        self.stat_dates.read().await.len()
    }

    pub fn prune_call_count(&self) -> u64 {
        self.prune_call_count.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl CacheCleanupRepository for MockStatsRepository {
    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<u64, CacheError> {
        Ok(0)
    }

    async fn count_live_by_endpoint(
        &self,
        _now: DateTime<Utc>,
    ) -> Result<Vec<(String, u64)>, CacheError> {
        Ok(Vec::new())
    }

    async fn count_live(&self, _now: DateTime<Utc>) -> Result<u64, CacheError> {
        Ok(0)
    }

    async fn evict_from_endpoint(
        &self,
        _endpoint_name: &str,
        _count: u64,
        _now: DateTime<Utc>,
    ) -> Result<u64, CacheError> {
        Ok(0)
    }

    async fn evict_global(&self, _count: u64, _now: DateTime<Utc>) -> Result<u64, CacheError> {
        Ok(0)
    }

    async fn optimize(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete_stats_before(&self, cutoff: NaiveDate) -> Result<u64, CacheError> {
        self.prune_call_count.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(CacheError::Unavailable("mock prune failure".into()));
        }
        let mut dates = self.stat_dates.write().await;
        let before = dates.len();
        dates.retain(|date| *date >= cutoff);
        Ok((before - dates.len()) as u64)
    }
}
