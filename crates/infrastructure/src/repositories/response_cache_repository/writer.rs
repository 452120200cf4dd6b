use super::helpers::format_timestamp;
use acumba_cache_domain::CacheEntry;
use sqlx::SqlitePool;

/// Serialized form of a [`CacheEntry`], built once before any retry.
pub(super) struct EntryRow {
    fingerprint: String,
    endpoint_name: String,
    parameters: String,
    response_data: String,
    created_at: String,
    expires_at: String,
}

impl EntryRow {
    pub fn from_entry(entry: &CacheEntry) -> Result<Self, serde_json::Error> {
        Ok(Self {
            fingerprint: entry.fingerprint.clone(),
            endpoint_name: entry.endpoint_name.clone(),
            parameters: serde_json::to_string(&entry.parameters)?,
            response_data: serde_json::to_string(&entry.response_data)?,
            created_at: format_timestamp(entry.created_at),
            expires_at: format_timestamp(entry.expires_at),
        })
    }
}

/// Replacing an entry restarts its lifetime: fresh timestamps, zero hits.
pub(super) async fn upsert_entry(pool: &SqlitePool, row: &EntryRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO api_cache
             (fingerprint, endpoint_name, parameters, response_data,
              created_at, expires_at, last_accessed_at, hit_count)
         VALUES (?, ?, ?, ?, ?, ?, ?, 0)
         ON CONFLICT(fingerprint) DO UPDATE SET
             endpoint_name = excluded.endpoint_name,
             parameters = excluded.parameters,
             response_data = excluded.response_data,
             created_at = excluded.created_at,
             expires_at = excluded.expires_at,
             last_accessed_at = excluded.last_accessed_at,
             hit_count = 0",
    )
    .bind(&row.fingerprint)
    .bind(&row.endpoint_name)
    .bind(&row.parameters)
    .bind(&row.response_data)
    .bind(&row.created_at)
    .bind(&row.expires_at)
    .bind(&row.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
