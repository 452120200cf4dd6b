use acumba_cache_domain::{CacheEntry, CacheError, DailyStat, Parameters};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::error;

/// Fixed width, so lexical order in SQL matches chronological order. Full
/// nanosecond precision keeps SQL expiry checks in step with
/// [`CacheEntry::is_expired_at`].
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn unavailable(operation: &'static str, e: sqlx::Error) -> CacheError {
    error!(operation, error = %e, "Cache database operation failed");
    CacheError::Unavailable(format!("{operation}: {e}"))
}

pub fn to_count(value: i64) -> u64 {
    value.max(0) as u64
}

pub fn row_to_daily_stat(row: &SqliteRow) -> Result<Option<DailyStat>, sqlx::Error> {
    let raw_date: String = row.try_get("date")?;
    let Some(date) = parse_date(&raw_date) else {
        return Ok(None);
    };

    Ok(Some(DailyStat {
        endpoint_name: row.try_get("endpoint_name")?,
        date,
        total_requests: to_count(row.try_get("total_requests")?),
        cache_hits: to_count(row.try_get("cache_hits")?),
        cache_misses: to_count(row.try_get("cache_misses")?),
    }))
}

/// `None` when a stored column no longer parses; such rows are reported as
/// absent rather than failing the whole read.
pub fn row_to_cache_entry(row: &SqliteRow) -> Result<Option<CacheEntry>, sqlx::Error> {
    let parameters: String = row.try_get("parameters")?;
    let response_data: String = row.try_get("response_data")?;
    let created_at: String = row.try_get("created_at")?;
    let expires_at: String = row.try_get("expires_at")?;
    let last_accessed_at: String = row.try_get("last_accessed_at")?;

    let (Ok(parameters), Ok(response_data)) = (
        serde_json::from_str::<Parameters>(&parameters),
        serde_json::from_str(&response_data),
    ) else {
        return Ok(None);
    };
    let (Some(created_at), Some(expires_at), Some(last_accessed_at)) = (
        parse_timestamp(&created_at),
        parse_timestamp(&expires_at),
        parse_timestamp(&last_accessed_at),
    ) else {
        return Ok(None);
    };

    Ok(Some(CacheEntry {
        fingerprint: row.try_get("fingerprint")?,
        endpoint_name: row.try_get("endpoint_name")?,
        parameters,
        response_data,
        created_at,
        expires_at,
        last_accessed_at,
        hit_count: to_count(row.try_get("hit_count")?),
    }))
}
