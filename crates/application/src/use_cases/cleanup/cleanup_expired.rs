use crate::ports::{CacheCleanupRepository, Clock};
use acumba_cache_domain::CacheError;
use std::sync::Arc;
use tracing::info;

pub struct CleanupExpiredEntriesUseCase {
    repository: Arc<dyn CacheCleanupRepository>,
    clock: Arc<dyn Clock>,
}

impl CleanupExpiredEntriesUseCase {
    pub fn new(repository: Arc<dyn CacheCleanupRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn execute(&self) -> Result<u64, CacheError> {
        let deleted = self.repository.delete_expired(self.clock.now()).await?;
        if deleted > 0 {
            info!(deleted, "Expired cache entries removed");
        }
        Ok(deleted)
    }
}
