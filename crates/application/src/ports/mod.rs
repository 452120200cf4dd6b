mod cache_cleanup_repository;
mod cache_maintenance_port;
mod cache_stats_reader;
mod clock;
mod response_cache_repository;

pub use cache_cleanup_repository::CacheCleanupRepository;
pub use cache_maintenance_port::{CacheMaintenancePort, CleanupOutcome, OptimizeOutcome};
pub use cache_stats_reader::CacheStatsReader;
pub use clock::{Clock, SystemClock};
pub use response_cache_repository::ResponseCacheRepository;
