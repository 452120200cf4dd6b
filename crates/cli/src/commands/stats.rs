use crate::di::UseCases;
use acumba_cache_domain::CacheReport;
use std::path::PathBuf;
use tracing::info;

pub async fn run(use_cases: &UseCases, days: u32, export: Option<PathBuf>) -> anyhow::Result<()> {
    let report = use_cases.cache_report.execute(days).await?;
    print_report(&report, days);

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        info!(path = %path.display(), "Cache report exported");
        println!("\nReport exported to {}", path.display());
    }
    Ok(())
}

fn print_report(report: &CacheReport, days: u32) {
    let storage = &report.storage;
    println!("Cache report ({})", report.generated_at);
    println!("  entries:          {}", storage.total_entries);
    println!("  total hits:       {}", storage.total_hits);
    println!("  endpoints:        {}", storage.unique_endpoints);
    println!("  payload size:     {} bytes", storage.total_size_bytes);
    println!("  database size:    {} bytes", storage.database_size_bytes);

    println!("\nEndpoints");
    if report.endpoints.is_empty() {
        println!("  (none)");
    }
    for ep in &report.endpoints {
        println!(
            "  {:<20} {:>6} entries ({} valid, {} expired)  avg hits {:.2}  {} bytes",
            ep.endpoint_name,
            ep.total_entries,
            ep.valid_entries,
            ep.expired_entries,
            ep.avg_hits,
            ep.total_size_bytes,
        );
    }

    println!("\nHit rates, last {days} days");
    if report.recent_hit_rates.is_empty() {
        println!("  (no requests recorded)");
    }
    for rate in &report.recent_hit_rates {
        println!(
            "  {}  {:<20} {:>6.1}%  ({}/{} hits)",
            rate.stat.date,
            rate.stat.endpoint_name,
            rate.hit_rate,
            rate.stat.cache_hits,
            rate.stat.total_requests,
        );
    }

    let perf = &report.performance;
    println!("\nPerformance");
    println!("  average hit count: {:.2}", perf.average_hit_count);
    println!(
        "  most used:         {}",
        perf.most_used_endpoint.as_deref().unwrap_or("-")
    );
    println!("  efficiency:        {}", perf.cache_efficiency.as_str());
}
