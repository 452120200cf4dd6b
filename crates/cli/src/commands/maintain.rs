use crate::di::UseCases;
use acumba_cache_domain::Config;
use acumba_cache_jobs::{CacheMaintenanceJob, JobRunner, StatsRetentionJob};
use tracing::info;

pub async fn run(use_cases: &UseCases, config: &Config) -> anyhow::Result<()> {
    let maintenance = &config.maintenance;

    let shutdown = JobRunner::new()
        .with_cache_maintenance(
            CacheMaintenanceJob::new(use_cases.maintenance.clone()).with_intervals(
                maintenance.cleanup_interval_secs,
                maintenance.optimize_interval_secs,
            ),
        )
        .with_stats_retention(
            StatsRetentionJob::new(
                use_cases.prune_stats.clone(),
                maintenance.stats_retention_days,
            )
            .with_interval(maintenance.stats_retention_interval_secs),
        )
        .start()
        .await;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping maintenance jobs");
    shutdown.cancel();
    Ok(())
}
