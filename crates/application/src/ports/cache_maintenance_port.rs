use acumba_cache_domain::CacheError;
use async_trait::async_trait;

/// Outcome of an expired sweep followed by limit enforcement.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub expired_removed: u64,
    pub evicted: u64,
    pub remaining: u64,
}

impl CleanupOutcome {
    pub fn total_removed(&self) -> u64 {
        self.expired_removed + self.evicted
    }
}

/// Outcome of a storage optimization pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptimizeOutcome {
    pub size_before_bytes: u64,
    pub size_after_bytes: u64,
}

/// Port for periodic cache maintenance (cleanup + storage optimization).
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Remove expired entries, then evict down to the configured limits.
    async fn run_cleanup_cycle(&self) -> Result<CleanupOutcome, CacheError>;

    /// Reclaim space freed by deletions.
    async fn run_optimize_cycle(&self) -> Result<OptimizeOutcome, CacheError>;
}
