use crate::ports::{Clock, ResponseCacheRepository};
use crate::services::fingerprint::fingerprint;
use acumba_cache_domain::config::{CacheConfig, DEFAULT_TTL_SECS};
use acumba_cache_domain::{CacheEntry, CacheError, Parameters, ResponseData};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct SetCachedResponseUseCase {
    repository: Arc<dyn ResponseCacheRepository>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
}

impl SetCachedResponseUseCase {
    pub fn new(
        repository: Arc<dyn ResponseCacheRepository>,
        clock: Arc<dyn Clock>,
        config: CacheConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// TTL for an endpoint: its configured value, the configured default, or
    /// the hard-coded default when neither exists.
    pub fn resolve_ttl(&self, endpoint_name: &str) -> Duration {
        match self.config.configured_ttl(endpoint_name) {
            Some(ttl) => ttl,
            None => {
                warn!(
                    endpoint = endpoint_name,
                    ttl_secs = DEFAULT_TTL_SECS,
                    "No TTL configured for endpoint, using built-in default"
                );
                Duration::from_secs(DEFAULT_TTL_SECS)
            }
        }
    }

    /// Upserts the response. An explicit `ttl` wins over the configured one.
    pub async fn execute(
        &self,
        endpoint_name: &str,
        parameters: &Parameters,
        response_data: ResponseData,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let fingerprint = fingerprint(endpoint_name, parameters)?;
        let ttl = ttl.unwrap_or_else(|| self.resolve_ttl(endpoint_name));

        let entry = CacheEntry::new(
            fingerprint,
            endpoint_name.to_string(),
            parameters.clone(),
            response_data,
            self.clock.now(),
            ttl,
        );

        self.repository.store(&entry).await?;

        debug!(
            endpoint = endpoint_name,
            fingerprint = %entry.fingerprint,
            ttl_secs = ttl.as_secs(),
            "Response cached"
        );
        Ok(())
    }
}
