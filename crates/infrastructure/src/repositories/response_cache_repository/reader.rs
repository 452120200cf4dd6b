use super::helpers::{
    format_date, format_timestamp, row_to_cache_entry, row_to_daily_stat, to_count,
};
use acumba_cache_domain::{CacheEntry, DailyStat, EndpointSummary, StorageSummary};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::warn;

pub(super) async fn endpoint_summaries(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<EndpointSummary>, sqlx::Error> {
    let now_raw = format_timestamp(now);
    let rows = sqlx::query(
        "SELECT endpoint_name,
                COUNT(*) AS total_entries,
                SUM(CASE WHEN expires_at > ? THEN 1 ELSE 0 END) AS valid_entries,
                SUM(CASE WHEN expires_at <= ? THEN 1 ELSE 0 END) AS expired_entries,
                AVG(hit_count) AS avg_hits,
                SUM(hit_count) AS total_hits,
                MIN(created_at) AS oldest_entry,
                MAX(created_at) AS newest_entry,
                SUM(LENGTH(CAST(response_data AS BLOB))) AS total_size_bytes
         FROM api_cache
         GROUP BY endpoint_name
         ORDER BY total_entries DESC, endpoint_name ASC",
    )
    .bind(&now_raw)
    .bind(&now_raw)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<EndpointSummary, sqlx::Error> {
            Ok(EndpointSummary {
                endpoint_name: row.try_get("endpoint_name")?,
                total_entries: to_count(row.try_get("total_entries")?),
                valid_entries: to_count(row.try_get("valid_entries")?),
                expired_entries: to_count(row.try_get("expired_entries")?),
                avg_hits: row.try_get::<Option<f64>, _>("avg_hits")?.unwrap_or(0.0),
                total_hits: to_count(row.try_get("total_hits")?),
                oldest_entry: row.try_get("oldest_entry")?,
                newest_entry: row.try_get("newest_entry")?,
                total_size_bytes: to_count(row.try_get("total_size_bytes")?),
            })
        })
        .collect()
}

pub(super) async fn daily_stats_since(
    pool: &SqlitePool,
    since: NaiveDate,
) -> Result<Vec<DailyStat>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT endpoint_name, date, total_requests, cache_hits, cache_misses
         FROM cache_stats
         WHERE date >= ?
         ORDER BY date DESC, endpoint_name ASC",
    )
    .bind(format_date(since))
    .fetch_all(pool)
    .await?;

    let mut stats = Vec::with_capacity(rows.len());
    for row in &rows {
        match row_to_daily_stat(row)? {
            Some(stat) => stats.push(stat),
            None => warn!("Skipping daily stats row with malformed date"),
        }
    }
    Ok(stats)
}

pub(super) async fn daily_stat(
    pool: &SqlitePool,
    endpoint_name: &str,
    date: NaiveDate,
) -> Result<Option<DailyStat>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT endpoint_name, date, total_requests, cache_hits, cache_misses
         FROM cache_stats
         WHERE endpoint_name = ? AND date = ?",
    )
    .bind(endpoint_name)
    .bind(format_date(date))
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => row_to_daily_stat(&row),
        None => Ok(None),
    }
}

pub(super) async fn storage_summary(pool: &SqlitePool) -> Result<StorageSummary, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS total_entries,
                COALESCE(SUM(hit_count), 0) AS total_hits,
                COUNT(DISTINCT endpoint_name) AS unique_endpoints,
                COALESCE(SUM(LENGTH(CAST(response_data AS BLOB))), 0) AS total_size_bytes
         FROM api_cache",
    )
    .fetch_one(pool)
    .await?;

    let (database_size,): (i64,) = sqlx::query_as(
        "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
    )
    .fetch_one(pool)
    .await?;

    Ok(StorageSummary {
        total_entries: to_count(row.try_get("total_entries")?),
        total_hits: to_count(row.try_get("total_hits")?),
        unique_endpoints: to_count(row.try_get("unique_endpoints")?),
        total_size_bytes: to_count(row.try_get("total_size_bytes")?),
        database_size_bytes: to_count(database_size),
    })
}

pub(super) async fn find_entry(
    pool: &SqlitePool,
    fingerprint: &str,
) -> Result<Option<CacheEntry>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT fingerprint, endpoint_name, parameters, response_data,
                created_at, expires_at, last_accessed_at, hit_count
         FROM api_cache
         WHERE fingerprint = ?",
    )
    .bind(fingerprint)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => row_to_cache_entry(&row),
        None => Ok(None),
    }
}
