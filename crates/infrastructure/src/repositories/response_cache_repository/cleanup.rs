use super::helpers::{format_date, format_timestamp, to_count};
use crate::database::{with_retry, RetryPolicy};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

const EXPIRED_DELETE_BATCH: i64 = 500;
const BATCH_PAUSE: Duration = Duration::from_millis(10);

const EVICTION_ORDER: &str =
    "ORDER BY last_accessed_at ASC, hit_count ASC, created_at ASC, fingerprint ASC";

/// Deletes in bounded batches so concurrent writers get the lock between
/// them. Each batch commits on its own and is retried on its own.
pub(super) async fn delete_expired(
    pool: &SqlitePool,
    retry: &RetryPolicy,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let now_raw = &format_timestamp(now);

    delete_in_batches(retry, move || async move {
        let deleted = sqlx::query(
            "DELETE FROM api_cache
             WHERE fingerprint IN (
                 SELECT fingerprint FROM api_cache WHERE expires_at <= ? LIMIT ?
             )
             AND expires_at <= ?",
        )
        .bind(now_raw)
        .bind(EXPIRED_DELETE_BATCH)
        .bind(now_raw)
        .execute(pool)
        .await?
        .rows_affected();
        Ok::<_, sqlx::Error>(deleted)
    })
    .await
}

/// Runs `delete_batch` until a short batch. Rows from committed batches are
/// reported even when a later batch exhausts its retries; the failure only
/// surfaces when nothing was removed.
async fn delete_in_batches<F, Fut>(
    retry: &RetryPolicy,
    mut delete_batch: F,
) -> Result<u64, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<u64, sqlx::Error>>,
{
    let mut total = 0u64;

    loop {
        let deleted = match with_retry(retry, "delete_expired_batch", &mut delete_batch).await {
            Ok(deleted) => deleted,
            Err(e) if total > 0 => {
                warn!(
                    deleted = total,
                    error = %e,
                    "Expired sweep interrupted, remainder left for next run"
                );
                return Ok(total);
            }
            Err(e) => return Err(e),
        };

        total += deleted;
        if deleted < EXPIRED_DELETE_BATCH as u64 {
            break;
        }
        debug!(deleted, total, "Expired batch removed, continuing");
        tokio::time::sleep(BATCH_PAUSE).await;
    }

    if total > 0 {
        info!(deleted = total, "Expired cache entries removed");
    }
    Ok(total)
}

pub(super) async fn count_live_by_endpoint(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<(String, u64)>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT endpoint_name, COUNT(*) AS live
         FROM api_cache
         WHERE expires_at > ?
         GROUP BY endpoint_name
         ORDER BY endpoint_name",
    )
    .bind(format_timestamp(now))
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<(String, u64), sqlx::Error> {
            Ok((
                row.try_get::<String, _>("endpoint_name")?,
                to_count(row.try_get("live")?),
            ))
        })
        .collect()
}

pub(super) async fn count_live(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let (live,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM api_cache WHERE expires_at > ?")
        .bind(format_timestamp(now))
        .fetch_one(pool)
        .await?;
    Ok(to_count(live))
}

pub(super) async fn evict_from_endpoint(
    pool: &SqlitePool,
    endpoint_name: &str,
    count: u64,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "DELETE FROM api_cache WHERE fingerprint IN (
             SELECT fingerprint FROM api_cache
             WHERE endpoint_name = ? AND expires_at > ?
             {EVICTION_ORDER}
             LIMIT ?
         )"
    );
    let evicted = sqlx::query(&sql)
        .bind(endpoint_name)
        .bind(format_timestamp(now))
        .bind(count.min(i64::MAX as u64) as i64)
        .execute(pool)
        .await?
        .rows_affected();

    debug!(endpoint = endpoint_name, evicted, "Endpoint limit enforced");
    Ok(evicted)
}

pub(super) async fn evict_global(
    pool: &SqlitePool,
    count: u64,
    now: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "DELETE FROM api_cache WHERE fingerprint IN (
             SELECT fingerprint FROM api_cache
             WHERE expires_at > ?
             {EVICTION_ORDER}
             LIMIT ?
         )"
    );
    let evicted = sqlx::query(&sql)
        .bind(format_timestamp(now))
        .bind(count.min(i64::MAX as u64) as i64)
        .execute(pool)
        .await?
        .rows_affected();

    debug!(evicted, "Global limit enforced");
    Ok(evicted)
}

/// VACUUM cannot run inside a transaction; every statement here runs on its
/// own in autocommit mode.
pub(super) async fn optimize(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(pool)
        .await?;
    sqlx::query("VACUUM").execute(pool).await?;
    sqlx::query("ANALYZE").execute(pool).await?;
    Ok(())
}

pub(super) async fn delete_stats_before(
    pool: &SqlitePool,
    cutoff: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let deleted = sqlx::query("DELETE FROM cache_stats WHERE date < ?")
        .bind(format_date(cutoff))
        .execute(pool)
        .await?
        .rows_affected();
    Ok(deleted)
}
