use chrono::NaiveDate;
use serde::Serialize;

/// Per-endpoint request counters for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStat {
    pub endpoint_name: String,
    pub date: NaiveDate,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl DailyStat {
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.cache_hits as f64 * 100.0 / self.total_requests as f64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyHitRate {
    #[serde(flatten)]
    pub stat: DailyStat,
    pub hit_rate: f64,
}

impl From<DailyStat> for DailyHitRate {
    fn from(stat: DailyStat) -> Self {
        let hit_rate = stat.hit_rate();
        Self { stat, hit_rate }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointSummary {
    pub endpoint_name: String,
    pub total_entries: u64,
    pub valid_entries: u64,
    pub expired_entries: u64,
    pub avg_hits: f64,
    pub total_hits: u64,
    pub oldest_entry: Option<String>,
    pub newest_entry: Option<String>,
    pub total_size_bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageSummary {
    pub total_entries: u64,
    pub total_hits: u64,
    pub unique_endpoints: u64,
    pub total_size_bytes: u64,
    pub database_size_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CacheEfficiency {
    High,
    Medium,
    #[default]
    Low,
}

impl CacheEfficiency {
    pub fn from_average_hits(avg: f64) -> Self {
        if avg > 5.0 {
            CacheEfficiency::High
        } else if avg > 2.0 {
            CacheEfficiency::Medium
        } else {
            CacheEfficiency::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheEfficiency::High => "High",
            CacheEfficiency::Medium => "Medium",
            CacheEfficiency::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceMetrics {
    pub average_hit_count: f64,
    pub most_used_endpoint: Option<String>,
    pub cache_efficiency: CacheEfficiency,
}

impl PerformanceMetrics {
    pub fn from_endpoints(endpoints: &[EndpointSummary]) -> Self {
        let total_entries: u64 = endpoints.iter().map(|e| e.total_entries).sum();
        if total_entries == 0 {
            return Self::default();
        }

        let total_hits: u64 = endpoints.iter().map(|e| e.total_hits).sum();
        let average = total_hits as f64 / total_entries as f64;

        let most_used_endpoint = endpoints
            .iter()
            .max_by(|a, b| a.avg_hits.total_cmp(&b.avg_hits))
            .map(|e| e.endpoint_name.clone());

        Self {
            average_hit_count: (average * 100.0).round() / 100.0,
            most_used_endpoint,
            cache_efficiency: CacheEfficiency::from_average_hits(average),
        }
    }
}

/// Snapshot of the cache consumed by reporting tools.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub generated_at: String,
    pub storage: StorageSummary,
    pub endpoints: Vec<EndpointSummary>,
    pub recent_hit_rates: Vec<DailyHitRate>,
    pub performance: PerformanceMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, entries: u64, hits: u64) -> EndpointSummary {
        EndpointSummary {
            endpoint_name: name.to_string(),
            total_entries: entries,
            valid_entries: entries,
            total_hits: hits,
            avg_hits: hits as f64 / entries as f64,
            ..Default::default()
        }
    }

    #[test]
    fn test_hit_rate_without_requests_is_zero() {
        let stat = DailyStat {
            endpoint_name: "get_lists".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            total_requests: 0,
            cache_hits: 0,
            cache_misses: 0,
        };
        assert_eq!(stat.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_percentage() {
        let stat = DailyStat {
            endpoint_name: "get_lists".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            total_requests: 4,
            cache_hits: 3,
            cache_misses: 1,
        };
        assert_eq!(stat.hit_rate(), 75.0);
    }

    #[test]
    fn test_performance_metrics_empty() {
        let metrics = PerformanceMetrics::from_endpoints(&[]);
        assert_eq!(metrics.average_hit_count, 0.0);
        assert!(metrics.most_used_endpoint.is_none());
        assert_eq!(metrics.cache_efficiency, CacheEfficiency::Low);
    }

    #[test]
    fn test_performance_metrics_picks_highest_average() {
        let metrics = PerformanceMetrics::from_endpoints(&[
            summary("get_lists", 10, 10),
            summary("get_subscribers", 2, 20),
        ]);
        assert_eq!(metrics.most_used_endpoint.as_deref(), Some("get_subscribers"));
        assert_eq!(metrics.average_hit_count, 2.5);
        assert_eq!(metrics.cache_efficiency, CacheEfficiency::Medium);
    }

    #[test]
    fn test_efficiency_thresholds() {
        assert_eq!(CacheEfficiency::from_average_hits(5.1), CacheEfficiency::High);
        assert_eq!(CacheEfficiency::from_average_hits(5.0), CacheEfficiency::Medium);
        assert_eq!(CacheEfficiency::from_average_hits(2.0), CacheEfficiency::Low);
    }
}
