use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// TTL used when neither the endpoint nor the configuration provide one.
pub const DEFAULT_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Fallback TTL in seconds for endpoints missing from `endpoint_ttls`.
    #[serde(default = "default_ttl")]
    pub default_ttl: Option<u64>,

    /// Per-endpoint TTL in seconds, e.g. `get_subscribers = 1800`.
    #[serde(default)]
    pub endpoint_ttls: HashMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: default_ttl(),
            endpoint_ttls: HashMap::new(),
        }
    }
}

impl CacheConfig {
    /// Configured TTL for an endpoint, or `None` when neither the endpoint
    /// nor `default_ttl` has one.
    pub fn configured_ttl(&self, endpoint_name: &str) -> Option<Duration> {
        self.endpoint_ttls
            .get(endpoint_name)
            .copied()
            .or(self.default_ttl)
            .map(Duration::from_secs)
    }

    pub fn ttl_for(&self, endpoint_name: &str) -> Duration {
        self.configured_ttl(endpoint_name)
            .unwrap_or(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

fn default_true() -> bool {
    true
}

fn default_ttl() -> Option<u64> {
    Some(DEFAULT_TTL_SECS)
}
