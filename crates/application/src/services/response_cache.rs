use crate::use_cases::{GetCachedResponseUseCase, SetCachedResponseUseCase};
use acumba_cache_domain::{CacheError, Parameters};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Memoization facade for remote-call wrappers.
///
/// Storage and serialization failures are logged and treated as "no cache";
/// only malformed inputs ([`CacheError::InvalidInput`]) reach the caller.
pub struct ResponseCache {
    get: Arc<GetCachedResponseUseCase>,
    set: Arc<SetCachedResponseUseCase>,
    enabled: bool,
}

impl ResponseCache {
    pub fn new(get: Arc<GetCachedResponseUseCase>, set: Arc<SetCachedResponseUseCase>) -> Self {
        Self {
            get,
            set,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cached value for the call, if any. A stored payload that does not
    /// deserialize into `T` is returned as a miss, but the lookup has already
    /// been counted as a hit in the daily statistics.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint_name: &str,
        parameters: &Parameters,
    ) -> Result<Option<T>, CacheError> {
        if !self.enabled {
            return Ok(None);
        }

        match self.get.execute(endpoint_name, parameters).await {
            Ok(Some(data)) => match serde_json::from_value(data) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!(
                        endpoint = endpoint_name,
                        error = %e,
                        stats_recorded = "hit",
                        "Cached payload does not match the expected type, returning a miss \
                         although the lookup was counted as a hit"
                    );
                    Ok(None)
                }
            },
            Ok(None) => Ok(None),
            Err(e) if e.is_degradable() => {
                warn!(
                    endpoint = endpoint_name,
                    error = %e,
                    "Cache lookup failed, continuing uncached"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn put<T: Serialize>(
        &self,
        endpoint_name: &str,
        parameters: &Parameters,
        data: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    endpoint = endpoint_name,
                    error = %e,
                    "Response cannot be serialized, not caching"
                );
                return Ok(());
            }
        };

        match self.set.execute(endpoint_name, parameters, value, ttl).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_degradable() => {
                warn!(
                    endpoint = endpoint_name,
                    error = %e,
                    "Cache write failed, response not cached"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the cached value, or runs `fetch`, caches a successful result
    /// and returns it. Fetch errors are passed through and never cached.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        endpoint_name: &str,
        parameters: &Parameters,
        fetch: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get::<T>(endpoint_name, parameters).await? {
            return Ok(cached);
        }

        let fresh = fetch().await?;
        self.put(endpoint_name, parameters, &fresh, None).await?;
        Ok(fresh)
    }
}
