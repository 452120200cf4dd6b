use super::Repositories;
use acumba_cache_application::ports::{Clock, SystemClock};
use acumba_cache_application::services::{CacheMaintenanceService, ResponseCache};
use acumba_cache_application::use_cases::{
    CleanupByLimitsUseCase, CleanupExpiredEntriesUseCase, GetCacheReportUseCase,
    GetCachedResponseUseCase, OptimizeStorageUseCase, PruneDailyStatsUseCase,
    SetCachedResponseUseCase,
};
use acumba_cache_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub response_cache: Arc<ResponseCache>,
    pub cleanup_expired: Arc<CleanupExpiredEntriesUseCase>,
    pub cleanup_by_limits: Arc<CleanupByLimitsUseCase>,
    pub optimize_storage: Arc<OptimizeStorageUseCase>,
    pub prune_stats: Arc<PruneDailyStatsUseCase>,
    pub cache_report: Arc<GetCacheReportUseCase>,
    pub maintenance: Arc<CacheMaintenanceService>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let get_cached = Arc::new(GetCachedResponseUseCase::new(
            repos.cache.clone(),
            clock.clone(),
        ));
        let set_cached = Arc::new(SetCachedResponseUseCase::new(
            repos.cache.clone(),
            clock.clone(),
            config.cache.clone(),
        ));
        let cleanup_expired = Arc::new(CleanupExpiredEntriesUseCase::new(
            repos.cache.clone(),
            clock.clone(),
        ));
        let cleanup_by_limits = Arc::new(CleanupByLimitsUseCase::new(
            repos.cache.clone(),
            clock.clone(),
            &config.maintenance,
        ));
        let optimize_storage = Arc::new(OptimizeStorageUseCase::new(
            repos.cache.clone(),
            repos.cache.clone(),
        ));

        Self {
            response_cache: Arc::new(
                ResponseCache::new(get_cached, set_cached).with_enabled(config.cache.enabled),
            ),
            maintenance: Arc::new(CacheMaintenanceService::new(
                cleanup_expired.clone(),
                cleanup_by_limits.clone(),
                optimize_storage.clone(),
                repos.cache.clone(),
                clock.clone(),
            )),
            prune_stats: Arc::new(PruneDailyStatsUseCase::new(
                repos.cache.clone(),
                clock.clone(),
            )),
            cache_report: Arc::new(GetCacheReportUseCase::new(repos.cache.clone(), clock)),
            cleanup_expired,
            cleanup_by_limits,
            optimize_storage,
        }
    }
}
