use crate::di::UseCases;

pub async fn run(
    use_cases: &UseCases,
    max_per_endpoint: Option<u64>,
    max_total: Option<u64>,
    optimize: bool,
) -> anyhow::Result<()> {
    let expired = use_cases.cleanup_expired.execute().await?;
    let evicted = use_cases
        .cleanup_by_limits
        .execute(max_per_endpoint, max_total)
        .await?;

    println!("Expired entries removed: {expired}");
    println!("Entries evicted by limits: {evicted}");

    if optimize {
        let outcome = use_cases.optimize_storage.execute().await?;
        println!(
            "Database size: {} -> {} bytes",
            outcome.size_before_bytes, outcome.size_after_bytes
        );
    }
    Ok(())
}
