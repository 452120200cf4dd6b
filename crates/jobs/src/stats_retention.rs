use acumba_cache_application::use_cases::PruneDailyStatsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct StatsRetentionJob {
    prune: Arc<PruneDailyStatsUseCase>,
    retention_days: u32,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl StatsRetentionJob {
    pub fn new(prune: Arc<PruneDailyStatsUseCase>, retention_days: u32) -> Self {
        Self {
            prune,
            retention_days,
            interval_secs: 86_400,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            retention_days = self.retention_days,
            interval_secs = self.interval_secs,
            "Starting cache stats retention job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("StatsRetentionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.prune.execute(self.retention_days).await {
                            Ok(deleted) => {
                                info!(deleted, "Cache stats retention completed");
                            }
                            Err(e) => {
                                error!(error = %e, "Cache stats retention failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
