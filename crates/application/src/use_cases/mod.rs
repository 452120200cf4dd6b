pub mod cache;
pub mod cleanup;
pub mod stats;

pub use cache::{GetCachedResponseUseCase, SetCachedResponseUseCase};
pub use cleanup::{
    CleanupByLimitsUseCase, CleanupExpiredEntriesUseCase, OptimizeStorageUseCase,
    PruneDailyStatsUseCase,
};
pub use stats::GetCacheReportUseCase;
