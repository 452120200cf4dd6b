#![allow(dead_code)]

use acumba_cache_application::ports::{
    CacheCleanupRepository, CacheStatsReader, Clock, ResponseCacheRepository,
};
use acumba_cache_domain::{
    CacheEntry, CacheError, DailyStat, EndpointSummary, ResponseData, StorageSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += TimeDelta::seconds(secs);
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now += TimeDelta::milliseconds(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
struct StoreState {
    entries: HashMap<String, CacheEntry>,
    stats: BTreeMap<(String, NaiveDate), DailyStat>,
}

/// In-memory stand-in for the SQLite repository.
#[derive(Clone)]
pub struct MockCacheStore {
    state: Arc<RwLock<StoreState>>,
    should_fail: Arc<RwLock<bool>>,
    failing_endpoints: Arc<RwLock<HashSet<String>>>,
    lookup_count: Arc<AtomicU64>,
    store_count: Arc<AtomicU64>,
    optimize_count: Arc<AtomicU64>,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            should_fail: Arc::new(RwLock::new(false)),
            failing_endpoints: Arc::new(RwLock::new(HashSet::new())),
            lookup_count: Arc::new(AtomicU64::new(0)),
            store_count: Arc::new(AtomicU64::new(0)),
            optimize_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn fail_evictions_for(&self, endpoint: &str) {
        self.failing_endpoints
            .write()
            .await
            .insert(endpoint.to_string());
    }

    pub async fn insert_entry(&self, entry: CacheEntry) {
        self.state
            .write()
            .await
            .entries
            .insert(entry.fingerprint.clone(), entry);
    }

    pub async fn insert_stat(&self, stat: DailyStat) {
        self.state
            .write()
            .await
            .stats
            .insert((stat.endpoint_name.clone(), stat.date), stat);
    }

    pub async fn entry_count(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn fingerprints(&self) -> HashSet<String> {
        self.state.read().await.entries.keys().cloned().collect()
    }

    pub async fn stat(&self, endpoint: &str, date: NaiveDate) -> Option<DailyStat> {
        self.state
            .read()
            .await
            .stats
            .get(&(endpoint.to_string(), date))
            .cloned()
    }

    pub fn lookup_count(&self) -> u64 {
        self.lookup_count.load(Ordering::Relaxed)
    }

    pub fn store_count(&self) -> u64 {
        self.store_count.load(Ordering::Relaxed)
    }

    pub fn optimize_count(&self) -> u64 {
        self.optimize_count.load(Ordering::Relaxed)
    }

    async fn check(&self) -> Result<(), CacheError> {
        if *self.should_fail.read().await {
            return Err(CacheError::Unavailable("database is locked".to_string()));
        }
        Ok(())
    }

    fn eviction_order(entries: &mut [&CacheEntry]) {
        entries.sort_by(|a, b| {
            a.last_accessed_at
                .cmp(&b.last_accessed_at)
                .then(a.hit_count.cmp(&b.hit_count))
                .then(a.created_at.cmp(&b.created_at))
                .then(a.fingerprint.cmp(&b.fingerprint))
        });
    }
}

fn record(state: &mut StoreState, endpoint: &str, date: NaiveDate, hit: bool) {
    let stat = state
        .stats
        .entry((endpoint.to_string(), date))
        .or_insert_with(|| DailyStat {
            endpoint_name: endpoint.to_string(),
            date,
            total_requests: 0,
            cache_hits: 0,
            cache_misses: 0,
        });
    stat.total_requests += 1;
    if hit {
        stat.cache_hits += 1;
    } else {
        stat.cache_misses += 1;
    }
}

#[async_trait]
impl ResponseCacheRepository for MockCacheStore {
    async fn lookup(
        &self,
        fingerprint: &str,
        endpoint_name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ResponseData>, CacheError> {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);
        self.check().await?;

        let mut state = self.state.write().await;
        let hit = match state.entries.get_mut(fingerprint) {
            Some(entry) if !entry.is_expired_at(now) => {
                entry.hit_count += 1;
                entry.last_accessed_at = now;
                Some(entry.response_data.clone())
            }
            _ => None,
        };
        record(&mut state, endpoint_name, now.date_naive(), hit.is_some());
        Ok(hit)
    }

    async fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        self.store_count.fetch_add(1, Ordering::Relaxed);
        self.check().await?;
        self.insert_entry(entry.clone()).await;
        Ok(())
    }
}

#[async_trait]
impl CacheCleanupRepository for MockCacheStore {
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CacheError> {
        self.check().await?;
        let mut state = self.state.write().await;
        let before = state.entries.len();
        state.entries.retain(|_, e| !e.is_expired_at(now));
        Ok((before - state.entries.len()) as u64)
    }

    async fn count_live_by_endpoint(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<(String, u64)>, CacheError> {
        self.check().await?;
        let state = self.state.read().await;
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for entry in state.entries.values().filter(|e| !e.is_expired_at(now)) {
            *counts.entry(entry.endpoint_name.clone()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_live(&self, now: DateTime<Utc>) -> Result<u64, CacheError> {
        self.check().await?;
        let state = self.state.read().await;
        Ok(state
            .entries
            .values()
            .filter(|e| !e.is_expired_at(now))
            .count() as u64)
    }

    async fn evict_from_endpoint(
        &self,
        endpoint_name: &str,
        count: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, CacheError> {
        self.check().await?;
        if self.failing_endpoints.read().await.contains(endpoint_name) {
            return Err(CacheError::Unavailable("database is locked".to_string()));
        }
        let mut state = self.state.write().await;
        let mut candidates: Vec<&CacheEntry> = state
            .entries
            .values()
            .filter(|e| e.endpoint_name == endpoint_name && !e.is_expired_at(now))
            .collect();
        Self::eviction_order(&mut candidates);
        let victims: Vec<String> = candidates
            .into_iter()
            .take(count as usize)
            .map(|e| e.fingerprint.clone())
            .collect();
        for fp in &victims {
            state.entries.remove(fp);
        }
        Ok(victims.len() as u64)
    }

    async fn evict_global(&self, count: u64, now: DateTime<Utc>) -> Result<u64, CacheError> {
        self.check().await?;
        let mut state = self.state.write().await;
        let mut candidates: Vec<&CacheEntry> = state
            .entries
            .values()
            .filter(|e| !e.is_expired_at(now))
            .collect();
        Self::eviction_order(&mut candidates);
        let victims: Vec<String> = candidates
            .into_iter()
            .take(count as usize)
            .map(|e| e.fingerprint.clone())
            .collect();
        for fp in &victims {
            state.entries.remove(fp);
        }
        Ok(victims.len() as u64)
    }

    async fn optimize(&self) -> Result<(), CacheError> {
        self.optimize_count.fetch_add(1, Ordering::Relaxed);
        self.check().await
    }

    async fn delete_stats_before(&self, cutoff: NaiveDate) -> Result<u64, CacheError> {
        self.check().await?;
        let mut state = self.state.write().await;
        let before = state.stats.len();
        state.stats.retain(|(_, date), _| *date >= cutoff);
        Ok((before - state.stats.len()) as u64)
    }
}

#[async_trait]
impl CacheStatsReader for MockCacheStore {
    async fn endpoint_summaries(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EndpointSummary>, CacheError> {
        self.check().await?;
        let state = self.state.read().await;
        let mut by_endpoint: BTreeMap<String, EndpointSummary> = BTreeMap::new();
        for entry in state.entries.values() {
            let summary = by_endpoint
                .entry(entry.endpoint_name.clone())
                .or_insert_with(|| EndpointSummary {
                    endpoint_name: entry.endpoint_name.clone(),
                    ..Default::default()
                });
            summary.total_entries += 1;
            summary.total_hits += entry.hit_count;
            if entry.is_expired_at(now) {
                summary.expired_entries += 1;
            } else {
                summary.valid_entries += 1;
            }
        }
        Ok(by_endpoint
            .into_values()
            .map(|mut s| {
                s.avg_hits = s.total_hits as f64 / s.total_entries as f64;
                s
            })
            .collect())
    }

    async fn daily_stats_since(&self, since: NaiveDate) -> Result<Vec<DailyStat>, CacheError> {
        self.check().await?;
        let state = self.state.read().await;
        Ok(state
            .stats
            .values()
            .filter(|s| s.date >= since)
            .cloned()
            .collect())
    }

    async fn daily_stat(
        &self,
        endpoint_name: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyStat>, CacheError> {
        self.check().await?;
        Ok(self.stat(endpoint_name, date).await)
    }

    async fn storage_summary(&self) -> Result<StorageSummary, CacheError> {
        self.check().await?;
        let state = self.state.read().await;
        let endpoints: HashSet<&str> = state
            .entries
            .values()
            .map(|e| e.endpoint_name.as_str())
            .collect();
        Ok(StorageSummary {
            total_entries: state.entries.len() as u64,
            total_hits: state.entries.values().map(|e| e.hit_count).sum(),
            unique_endpoints: endpoints.len() as u64,
            total_size_bytes: 0,
            database_size_bytes: 4096 * (1 + state.entries.len() as u64),
        })
    }

    async fn find_entry(&self, fingerprint: &str) -> Result<Option<CacheEntry>, CacheError> {
        self.check().await?;
        Ok(self.state.read().await.entries.get(fingerprint).cloned())
    }
}
