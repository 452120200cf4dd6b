pub mod cleanup_by_limits;
pub mod cleanup_expired;
pub mod optimize_storage;
pub mod prune_daily_stats;

pub use cleanup_by_limits::CleanupByLimitsUseCase;
pub use cleanup_expired::CleanupExpiredEntriesUseCase;
pub use optimize_storage::OptimizeStorageUseCase;
pub use prune_daily_stats::PruneDailyStatsUseCase;
