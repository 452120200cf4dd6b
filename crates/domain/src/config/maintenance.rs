use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    #[serde(default = "default_max_entries_per_endpoint")]
    pub max_entries_per_endpoint: u64,

    #[serde(default = "default_max_total_entries")]
    pub max_total_entries: u64,

    /// Seconds between expired-entry sweeps followed by limit enforcement.
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,

    /// Seconds between VACUUM/ANALYZE passes.
    #[serde(default = "default_optimize_interval_secs")]
    pub optimize_interval_secs: u64,

    /// Days of daily hit/miss statistics kept for reporting.
    #[serde(default = "default_stats_retention_days")]
    pub stats_retention_days: u32,

    #[serde(default = "default_stats_retention_interval_secs")]
    pub stats_retention_interval_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            max_entries_per_endpoint: default_max_entries_per_endpoint(),
            max_total_entries: default_max_total_entries(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            optimize_interval_secs: default_optimize_interval_secs(),
            stats_retention_days: default_stats_retention_days(),
            stats_retention_interval_secs: default_stats_retention_interval_secs(),
        }
    }
}

fn default_max_entries_per_endpoint() -> u64 {
    1_000
}

fn default_max_total_entries() -> u64 {
    10_000
}

fn default_cleanup_interval_secs() -> u64 {
    300
}

fn default_optimize_interval_secs() -> u64 {
    86_400
}

fn default_stats_retention_days() -> u32 {
    90
}

fn default_stats_retention_interval_secs() -> u64 {
    86_400
}
