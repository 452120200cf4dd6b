use acumba_cache_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;
const DEFAULT_OPTIMIZE_INTERVAL_SECS: u64 = 86_400;

/// Two independent loops: frequent cleanup (expired sweep + limits) and a
/// rare storage optimization.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    cleanup_interval_secs: u64,
    optimize_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            optimize_interval_secs: DEFAULT_OPTIMIZE_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_intervals(mut self, cleanup_secs: u64, optimize_secs: u64) -> Self {
        self.cleanup_interval_secs = cleanup_secs.max(1);
        self.optimize_interval_secs = optimize_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            cleanup_interval_secs = self.cleanup_interval_secs,
            optimize_interval_secs = self.optimize_interval_secs,
            "Starting cache maintenance background jobs"
        );

        // Cleanup runs once right away.
        let cleanup_job = Arc::clone(&self);
        let cleanup_shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(cleanup_job.cleanup_interval_secs));
            loop {
                tokio::select! {
                    _ = cleanup_shutdown.cancelled() => {
                        info!("CacheMaintenanceJob (cleanup): shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match cleanup_job.maintenance.run_cleanup_cycle().await {
                            Ok(outcome) => {
                                if outcome.total_removed() > 0 {
                                    info!(
                                        expired_removed = outcome.expired_removed,
                                        evicted = outcome.evicted,
                                        remaining = outcome.remaining,
                                        "Cache cleanup cycle completed"
                                    );
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "Cache cleanup cycle failed");
                            }
                        }
                    }
                }
            }
        });

        // Optimization waits a full period before its first run.
        let optimize_job = Arc::clone(&self);
        let optimize_shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let period = Duration::from_secs(optimize_job.optimize_interval_secs);
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = optimize_shutdown.cancelled() => {
                        info!("CacheMaintenanceJob (optimize): shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match optimize_job.maintenance.run_optimize_cycle().await {
                            Ok(outcome) => {
                                info!(
                                    size_before_bytes = outcome.size_before_bytes,
                                    size_after_bytes = outcome.size_after_bytes,
                                    "Cache optimize cycle completed"
                                );
                            }
                            Err(e) => {
                                error!(error = %e, "Cache optimize cycle failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
