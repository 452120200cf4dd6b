use crate::{CacheMaintenanceJob, StatsRetentionJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Starts the configured maintenance jobs under one shutdown token.
#[derive(Default)]
pub struct JobRunner {
    cache_maintenance: Option<CacheMaintenanceJob>,
    stats_retention: Option<StatsRetentionJob>,
    shutdown: CancellationToken,
}

impl JobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_maintenance(mut self, job: CacheMaintenanceJob) -> Self {
        self.cache_maintenance = Some(job);
        self
    }

    pub fn with_stats_retention(mut self, job: StatsRetentionJob) -> Self {
        self.stats_retention = Some(job);
        self
    }

    /// Cancelling `token` stops every job started by this runner.
    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Returns the token the jobs watch; cancel it to stop them.
    pub async fn start(self) -> CancellationToken {
        let mut started = 0usize;

        if let Some(job) = self.cache_maintenance {
            Arc::new(job.with_cancellation(self.shutdown.clone()))
                .start()
                .await;
            started += 1;
        }

        if let Some(job) = self.stats_retention {
            Arc::new(job.with_cancellation(self.shutdown.clone()))
                .start()
                .await;
            started += 1;
        }

        info!(jobs = started, "Background maintenance jobs started");
        self.shutdown
    }
}
