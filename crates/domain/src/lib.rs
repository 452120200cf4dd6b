//! Acumba Cache Domain Layer
pub mod cache_entry;
pub mod cache_stats;
pub mod config;
pub mod errors;

pub use cache_entry::{CacheEntry, Parameters, ResponseData, MAX_TTL};
pub use cache_stats::{
    CacheEfficiency, CacheReport, DailyHitRate, DailyStat, EndpointSummary, PerformanceMetrics,
    StorageSummary,
};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::CacheError;
