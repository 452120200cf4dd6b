use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Arguments of a cached remote call. Keys are kept sorted by the map itself;
/// nested objects are canonicalized before hashing.
pub type Parameters = BTreeMap<String, Value>;

/// Payload produced by the wrapped remote call.
pub type ResponseData = Value;

/// Upper bound applied to every TTL so expiry timestamps stay representable.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub fingerprint: String,
    pub endpoint_name: String,
    pub parameters: Parameters,
    pub response_data: ResponseData,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub hit_count: u64,
}

impl CacheEntry {
    pub fn new(
        fingerprint: String,
        endpoint_name: String,
        parameters: Parameters,
        response_data: ResponseData,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            fingerprint,
            endpoint_name,
            parameters,
            response_data,
            created_at,
            expires_at: expiry_for(created_at, ttl),
            last_accessed_at: created_at,
            hit_count: 0,
        }
    }

    /// Entries are logically absent from `expires_at` on, whether or not the
    /// row has been swept yet.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn ttl(&self) -> TimeDelta {
        self.expires_at - self.created_at
    }
}

pub fn expiry_for(created_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    let ttl = ttl.min(MAX_TTL);
    let delta = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::zero());
    created_at.checked_add_signed(delta).unwrap_or(created_at)
}
