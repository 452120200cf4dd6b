use crate::ports::{CacheCleanupRepository, Clock};
use acumba_cache_domain::CacheError;
use chrono::Days;
use std::sync::Arc;
use tracing::info;

pub struct PruneDailyStatsUseCase {
    repository: Arc<dyn CacheCleanupRepository>,
    clock: Arc<dyn Clock>,
}

impl PruneDailyStatsUseCase {
    pub fn new(repository: Arc<dyn CacheCleanupRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Deletes daily statistics dated before `today - retention_days`.
    pub async fn execute(&self, retention_days: u32) -> Result<u64, CacheError> {
        let today = self.clock.today();
        let cutoff = today
            .checked_sub_days(Days::new(retention_days as u64))
            .unwrap_or(today);

        let deleted = self.repository.delete_stats_before(cutoff).await?;
        info!(deleted, retention_days, cutoff = %cutoff, "Old daily cache statistics pruned");
        Ok(deleted)
    }
}
