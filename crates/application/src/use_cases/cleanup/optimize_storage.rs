use crate::ports::{CacheCleanupRepository, CacheStatsReader, OptimizeOutcome};
use acumba_cache_domain::CacheError;
use std::sync::Arc;
use tracing::info;

pub struct OptimizeStorageUseCase {
    repository: Arc<dyn CacheCleanupRepository>,
    reader: Arc<dyn CacheStatsReader>,
}

impl OptimizeStorageUseCase {
    pub fn new(
        repository: Arc<dyn CacheCleanupRepository>,
        reader: Arc<dyn CacheStatsReader>,
    ) -> Self {
        Self { repository, reader }
    }

    pub async fn execute(&self) -> Result<OptimizeOutcome, CacheError> {
        let size_before_bytes = self.reader.storage_summary().await?.database_size_bytes;
        self.repository.optimize().await?;
        let size_after_bytes = self.reader.storage_summary().await?.database_size_bytes;

        info!(
            size_before_bytes,
            size_after_bytes, "Cache database optimized"
        );
        Ok(OptimizeOutcome {
            size_before_bytes,
            size_after_bytes,
        })
    }
}
