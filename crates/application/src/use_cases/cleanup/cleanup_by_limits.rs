use crate::ports::{CacheCleanupRepository, Clock};
use acumba_cache_domain::config::MaintenanceConfig;
use acumba_cache_domain::CacheError;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct CleanupByLimitsUseCase {
    repository: Arc<dyn CacheCleanupRepository>,
    clock: Arc<dyn Clock>,
    default_max_per_endpoint: u64,
    default_max_total: u64,
}

impl CleanupByLimitsUseCase {
    pub fn new(
        repository: Arc<dyn CacheCleanupRepository>,
        clock: Arc<dyn Clock>,
        config: &MaintenanceConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            default_max_per_endpoint: config.max_entries_per_endpoint,
            default_max_total: config.max_total_entries,
        }
    }

    /// Evicts live entries until every endpoint holds at most
    /// `max_entries_per_endpoint` and the whole cache at most
    /// `max_total_entries`. `None` falls back to the configured limit.
    pub async fn execute(
        &self,
        max_entries_per_endpoint: Option<u64>,
        max_total_entries: Option<u64>,
    ) -> Result<u64, CacheError> {
        let per_endpoint = max_entries_per_endpoint.unwrap_or(self.default_max_per_endpoint);
        let total_limit = max_total_entries.unwrap_or(self.default_max_total);
        let now = self.clock.now();
        let mut removed = 0u64;

        for (endpoint, count) in self.repository.count_live_by_endpoint(now).await? {
            if count <= per_endpoint {
                continue;
            }
            let excess = count - per_endpoint;
            match self
                .repository
                .evict_from_endpoint(&endpoint, excess, now)
                .await
            {
                Ok(evicted) => {
                    debug!(endpoint = %endpoint, count, evicted, "Endpoint trimmed to limit");
                    removed += evicted;
                }
                Err(e) => {
                    warn!(endpoint = %endpoint, error = %e, "Endpoint eviction failed, continuing");
                }
            }
        }

        let total = self.repository.count_live(now).await?;
        if total > total_limit {
            let evicted = self
                .repository
                .evict_global(total - total_limit, now)
                .await?;
            debug!(total, evicted, "Cache trimmed to global limit");
            removed += evicted;
        }

        if removed > 0 {
            info!(
                removed,
                max_entries_per_endpoint = per_endpoint,
                max_total_entries = total_limit,
                "Cache entries evicted by limits"
            );
        }
        Ok(removed)
    }
}
