use super::helpers::{format_date, format_timestamp};
use acumba_cache_domain::ResponseData;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::warn;

/// Single lookup attempt. The hit-count bump, the stats row and, for an
/// undecodable payload, the row removal commit together.
pub(super) async fn lookup_once(
    pool: &SqlitePool,
    fingerprint: &str,
    endpoint_name: &str,
    now: DateTime<Utc>,
) -> Result<Option<ResponseData>, sqlx::Error> {
    let now_raw = format_timestamp(now);
    let mut tx = pool.begin().await?;

    let stored: Option<(String,)> = sqlx::query_as(
        "UPDATE api_cache
         SET hit_count = hit_count + 1, last_accessed_at = ?
         WHERE fingerprint = ? AND expires_at > ?
         RETURNING response_data",
    )
    .bind(&now_raw)
    .bind(fingerprint)
    .bind(&now_raw)
    .fetch_optional(&mut *tx)
    .await?;

    let payload = match stored {
        Some((raw,)) => match serde_json::from_str::<ResponseData>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    fingerprint,
                    endpoint = endpoint_name,
                    error = %e,
                    "Dropping cache entry with undecodable payload"
                );
                sqlx::query("DELETE FROM api_cache WHERE fingerprint = ?")
                    .bind(fingerprint)
                    .execute(&mut *tx)
                    .await?;
                None
            }
        },
        None => None,
    };

    record_request(&mut tx, endpoint_name, now, payload.is_some()).await?;
    tx.commit().await?;

    Ok(payload)
}

async fn record_request(
    tx: &mut Transaction<'_, Sqlite>,
    endpoint_name: &str,
    now: DateTime<Utc>,
    hit: bool,
) -> Result<(), sqlx::Error> {
    let (hits, misses) = if hit { (1i64, 0i64) } else { (0, 1) };

    sqlx::query(
        "INSERT INTO cache_stats (endpoint_name, date, total_requests, cache_hits, cache_misses)
         VALUES (?, ?, 1, ?, ?)
         ON CONFLICT(endpoint_name, date) DO UPDATE SET
             total_requests = total_requests + 1,
             cache_hits = cache_hits + excluded.cache_hits,
             cache_misses = cache_misses + excluded.cache_misses",
    )
    .bind(endpoint_name)
    .bind(format_date(now.date_naive()))
    .bind(hits)
    .bind(misses)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
