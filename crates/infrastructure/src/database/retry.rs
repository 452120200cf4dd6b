use acumba_cache_domain::config::DatabaseConfig;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff applied to BUSY/LOCKED failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: f64,
}

impl RetryPolicy {
    pub fn from_config(cfg: &DatabaseConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            initial_delay: Duration::from_millis(cfg.retry_initial_delay_ms),
            backoff_factor: cfg.retry_backoff_factor.max(1.0),
        }
    }

    /// Grown delay for the next attempt, capped at [`MAX_RETRY_DELAY`].
    /// A factor that overflows or is not finite lands on the cap.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        Duration::try_from_secs_f64(delay.as_secs_f64() * self.backoff_factor)
            .map(|next| next.min(MAX_RETRY_DELAY))
            .unwrap_or(MAX_RETRY_DELAY)
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DatabaseConfig::default())
    }
}

/// Lock contention worth retrying: SQLITE_BUSY or SQLITE_LOCKED (any extended
/// code), or a pool that could not hand out a connection in time.
pub fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
            .unwrap_or(false),
        sqlx::Error::PoolTimedOut => true,
        _ => false,
    }
}

pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut run: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 0u32;

    loop {
        match run().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries && is_transient(&e) => {
                attempt += 1;
                warn!(
                    operation,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Cache database busy, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = policy.next_delay(delay);
            }
            Err(e) => return Err(e),
        }
    }
}
