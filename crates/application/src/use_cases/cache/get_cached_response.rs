use crate::ports::{Clock, ResponseCacheRepository};
use crate::services::fingerprint::fingerprint;
use acumba_cache_domain::{CacheError, Parameters, ResponseData};
use std::sync::Arc;
use tracing::debug;

pub struct GetCachedResponseUseCase {
    repository: Arc<dyn ResponseCacheRepository>,
    clock: Arc<dyn Clock>,
}

impl GetCachedResponseUseCase {
    pub fn new(repository: Arc<dyn ResponseCacheRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// `Ok(None)` is a miss: absent, expired, or unreadable entry.
    pub async fn execute(
        &self,
        endpoint_name: &str,
        parameters: &Parameters,
    ) -> Result<Option<ResponseData>, CacheError> {
        let fingerprint = fingerprint(endpoint_name, parameters)?;
        let now = self.clock.now();

        let result = self
            .repository
            .lookup(&fingerprint, endpoint_name, now)
            .await?;

        debug!(
            endpoint = endpoint_name,
            fingerprint = %fingerprint,
            hit = result.is_some(),
            "Cache lookup"
        );
        Ok(result)
    }
}
