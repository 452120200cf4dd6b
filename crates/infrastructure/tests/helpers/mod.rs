#![allow(dead_code)]

use acumba_cache_application::ports::Clock;
use acumba_cache_domain::config::DatabaseConfig;
use acumba_cache_domain::{CacheEntry, Parameters};
use acumba_cache_infrastructure::database::{create_read_pool, create_write_pool};
use acumba_cache_infrastructure::repositories::SqliteResponseCacheRepository;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub struct TestDb {
    _dir: TempDir,
    pub url: String,
    pub pool: SqlitePool,
    pub repo: Arc<SqliteResponseCacheRepository>,
}

pub async fn create_test_db() -> TestDb {
    create_test_db_with(|_| {}).await
}

pub async fn create_test_db_with(configure: impl FnOnce(&mut DatabaseConfig)) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = DatabaseConfig {
        path: dir.path().join("cache.db").to_string_lossy().into_owned(),
        ..DatabaseConfig::default()
    };
    configure(&mut cfg);

    let pool = create_write_pool(&cfg.url(), &cfg).await.unwrap();
    let read_pool = create_read_pool(&cfg.url(), &cfg).await.unwrap();
    let repo = Arc::new(SqliteResponseCacheRepository::new(
        pool.clone(),
        read_pool,
        &cfg,
    ));

    TestDb {
        _dir: dir,
        url: cfg.url(),
        pool,
        repo,
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
}

pub fn secs(n: i64) -> TimeDelta {
    TimeDelta::seconds(n)
}

pub fn params(value: Value) -> Parameters {
    serde_json::from_value(value).unwrap()
}

pub fn entry(
    fingerprint: &str,
    endpoint: &str,
    created_at: DateTime<Utc>,
    ttl_secs: u64,
) -> CacheEntry {
    CacheEntry::new(
        fingerprint.to_string(),
        endpoint.to_string(),
        params(json!({ "id": fingerprint })),
        json!({ "fingerprint": fingerprint }),
        created_at,
        Duration::from_secs(ttl_secs),
    )
}

pub async fn row_count(pool: &SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM api_cache")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

pub async fn fingerprints(pool: &SqlitePool) -> Vec<String> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT fingerprint FROM api_cache ORDER BY fingerprint")
            .fetch_all(pool)
            .await
            .unwrap();
    rows.into_iter().map(|(fp,)| fp).collect()
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(t0()),
        }
    }

    pub fn advance_secs(&self, n: i64) {
        *self.now.lock().unwrap() += secs(n);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
