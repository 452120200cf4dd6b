use crate::ports::{CacheStatsReader, Clock};
use acumba_cache_domain::{CacheError, CacheReport, DailyHitRate, PerformanceMetrics};
use chrono::Days;
use std::sync::Arc;

pub struct GetCacheReportUseCase {
    reader: Arc<dyn CacheStatsReader>,
    clock: Arc<dyn Clock>,
}

impl GetCacheReportUseCase {
    pub fn new(reader: Arc<dyn CacheStatsReader>, clock: Arc<dyn Clock>) -> Self {
        Self { reader, clock }
    }

    /// Builds a report whose hit rates cover the last `days` days.
    pub async fn execute(&self, days: u32) -> Result<CacheReport, CacheError> {
        let now = self.clock.now();
        let today = now.date_naive();
        let since = today.checked_sub_days(Days::new(days as u64)).unwrap_or(today);

        let storage = self.reader.storage_summary().await?;

        let mut endpoints = self.reader.endpoint_summaries(now).await?;
        endpoints.sort_by(|a, b| {
            b.total_entries
                .cmp(&a.total_entries)
                .then_with(|| a.endpoint_name.cmp(&b.endpoint_name))
        });

        let mut recent_hit_rates: Vec<DailyHitRate> = self
            .reader
            .daily_stats_since(since)
            .await?
            .into_iter()
            .map(DailyHitRate::from)
            .collect();
        recent_hit_rates.sort_by(|a, b| {
            b.stat
                .date
                .cmp(&a.stat.date)
                .then_with(|| b.hit_rate.total_cmp(&a.hit_rate))
        });

        let performance = PerformanceMetrics::from_endpoints(&endpoints);

        Ok(CacheReport {
            generated_at: now.to_rfc3339(),
            storage,
            endpoints,
            recent_hit_rates,
            performance,
        })
    }
}
