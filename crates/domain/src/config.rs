pub mod cache;
pub mod database;
pub mod errors;
pub mod logging;
pub mod maintenance;
pub mod root;

pub use cache::{CacheConfig, DEFAULT_TTL_SECS};
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use maintenance::MaintenanceConfig;
pub use root::{CliOverrides, Config};
