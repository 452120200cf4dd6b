use serde::{Deserialize, Serialize};

pub const MIN_BACKOFF_FACTOR: f64 = 1.0;
pub const MAX_BACKOFF_FACTOR: f64 = 10.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_write_pool_max_connections")]
    pub write_pool_max_connections: u32,

    #[serde(default = "default_read_pool_max_connections")]
    pub read_pool_max_connections: u32,

    /// How long a connection waits on a locked database before SQLite
    /// reports BUSY. Default: 5 seconds.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    #[serde(default = "default_wal_autocheckpoint")]
    pub wal_autocheckpoint: u32,

    /// Retries applied to BUSY/LOCKED failures before the cache is reported
    /// unavailable.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,

    #[serde(default = "default_retry_backoff_factor")]
    pub retry_backoff_factor: f64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            write_pool_max_connections: default_write_pool_max_connections(),
            read_pool_max_connections: default_read_pool_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
            wal_autocheckpoint: default_wal_autocheckpoint(),
            max_retries: default_max_retries(),
            retry_initial_delay_ms: default_retry_initial_delay_ms(),
            retry_backoff_factor: default_retry_backoff_factor(),
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

fn default_db_path() -> String {
    "./api_cache.db".to_string()
}

fn default_write_pool_max_connections() -> u32 {
    2
}

fn default_read_pool_max_connections() -> u32 {
    4
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_wal_autocheckpoint() -> u32 {
    1_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_initial_delay_ms() -> u64 {
    50
}

fn default_retry_backoff_factor() -> f64 {
    1.5
}
