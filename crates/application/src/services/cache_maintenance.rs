use crate::ports::{
    CacheCleanupRepository, CacheMaintenancePort, CleanupOutcome, Clock, OptimizeOutcome,
};
use crate::use_cases::{
    CleanupByLimitsUseCase, CleanupExpiredEntriesUseCase, OptimizeStorageUseCase,
};
use acumba_cache_domain::CacheError;
use async_trait::async_trait;
use std::sync::Arc;

/// Runs the cleanup use cases in maintenance order: expired sweep first, then
/// limit enforcement over what is still live.
pub struct CacheMaintenanceService {
    cleanup_expired: Arc<CleanupExpiredEntriesUseCase>,
    cleanup_by_limits: Arc<CleanupByLimitsUseCase>,
    optimize: Arc<OptimizeStorageUseCase>,
    repository: Arc<dyn CacheCleanupRepository>,
    clock: Arc<dyn Clock>,
}

impl CacheMaintenanceService {
    pub fn new(
        cleanup_expired: Arc<CleanupExpiredEntriesUseCase>,
        cleanup_by_limits: Arc<CleanupByLimitsUseCase>,
        optimize: Arc<OptimizeStorageUseCase>,
        repository: Arc<dyn CacheCleanupRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cleanup_expired,
            cleanup_by_limits,
            optimize,
            repository,
            clock,
        }
    }
}

#[async_trait]
impl CacheMaintenancePort for CacheMaintenanceService {
    async fn run_cleanup_cycle(&self) -> Result<CleanupOutcome, CacheError> {
        let expired_removed = self.cleanup_expired.execute().await?;
        let evicted = self.cleanup_by_limits.execute(None, None).await?;
        let remaining = self.repository.count_live(self.clock.now()).await?;

        Ok(CleanupOutcome {
            expired_removed,
            evicted,
            remaining,
        })
    }

    async fn run_optimize_cycle(&self) -> Result<OptimizeOutcome, CacheError> {
        self.optimize.execute().await
    }
}
