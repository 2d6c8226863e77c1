//! Key/value cache with TTL.
//!
//! `Cache` is a typed JSON layer over a [`CacheBackend`]. Redis is used when
//! `REDIS_URL` is configured; otherwise entries live in a bounded in-process
//! map.

use async_trait::async_trait;
use dashmap::DashMap;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::{Config, DEFAULT_GENERATION_CACHE_TTL_SECONDS};
use crate::errors::{AppError, AppResult};

/// Raw string storage with per-entry expiry.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()>;

    async fn delete(&self, key: &str) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;

    /// Backend whose live entries are never evicted to make room.
    fn into_retaining(self: Arc<Self>) -> Arc<dyn CacheBackend>;

    /// Backend name for health reports
    fn name(&self) -> &'static str;
}

// =============================================================================
// Redis
// =============================================================================

pub struct RedisBackend {
    connection: ConnectionManager,
}

impl RedisBackend {
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get(key).await.map_err(cache_error)
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        // SET EX rejects 0
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds.max(1))
            .await
            .map_err(cache_error)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(key).await.map_err(cache_error)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    fn into_retaining(self: Arc<Self>) -> Arc<dyn CacheBackend> {
        self
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

fn cache_error(e: RedisError) -> AppError {
    AppError::Cache(e.to_string())
}

// =============================================================================
// In-process memory
// =============================================================================

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    created_at: Instant,
    ttl: Duration,
}

impl MemoryEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// Bounded concurrent map. Reads never block; inserts that may evict are
/// serialized so the bound holds under concurrent writers.
pub struct MemoryBackend {
    store: DashMap<String, MemoryEntry>,
    max_entries: usize,
    evict_live: bool,
    insert_guard: Mutex<()>,
}

impl MemoryBackend {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: DashMap::new(),
            max_entries: max_entries.max(1),
            evict_live: true,
            insert_guard: Mutex::new(()),
        }
    }

    /// Map that only drops expired entries when full. Live entries stay
    /// until their TTL runs out, so the bound is soft.
    pub fn retaining(max_entries: usize) -> Self {
        Self {
            evict_live: false,
            ..Self::new(max_entries)
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drop expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.is_expired());
        before.saturating_sub(self.store.len())
    }

    fn evict_oldest(&self) {
        let oldest = self
            .store
            .iter()
            .min_by_key(|entry| entry.value().created_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            self.store.remove(&key);
            tracing::debug!(key = %key, "Cache full, evicted oldest entry");
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if entry.is_expired() {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    fn insert(&self, key: &str, value: String, ttl_seconds: u64) {
        let _guard = self
            .insert_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !self.store.contains_key(key) && self.store.len() >= self.max_entries {
            let purged = self.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Purged expired cache entries");
            }
            while self.evict_live && self.store.len() >= self.max_entries {
                self.evict_oldest();
            }
        }

        self.store.insert(
            key.to_string(),
            MemoryEntry {
                value,
                created_at: Instant::now(),
                ttl: Duration::from_secs(ttl_seconds),
            },
        );
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()> {
        self.insert(key, value, ttl_seconds);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.store.remove(key);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn into_retaining(self: Arc<Self>) -> Arc<dyn CacheBackend> {
        if self.evict_live {
            Arc::new(MemoryBackend::retaining(self.max_entries))
        } else {
            self
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

// =============================================================================
// Typed cache
// =============================================================================

/// JSON cache shared across services.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    default_ttl: u64,
}

impl Cache {
    pub fn new(backend: Arc<dyn CacheBackend>, default_ttl: u64) -> Self {
        Self {
            backend,
            default_ttl,
        }
    }

    /// In-process cache holding at most `max_entries` keys.
    pub fn memory(max_entries: usize, default_ttl: u64) -> Self {
        Self::new(Arc::new(MemoryBackend::new(max_entries)), default_ttl)
    }

    /// Connect to Redis when configured, otherwise use memory.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let ttl = config.generation_cache_ttl_secs;

        match config.redis_url.as_deref() {
            Some(url) => {
                let backend = RedisBackend::connect(url).await.map_err(cache_error)?;
                tracing::info!("Redis cache connected");
                Ok(Self::new(Arc::new(backend), ttl))
            }
            None => {
                tracing::info!(
                    max_entries = config.generation_cache_max_entries,
                    "Using in-process cache"
                );
                Ok(Self::memory(config.generation_cache_max_entries, ttl))
            }
        }
    }

    /// Cache for entries that must survive pressure from other traffic.
    ///
    /// Redis is shared as is. An evicting memory map is swapped for a
    /// separate retaining one, so nothing written here competes with
    /// generation results for room.
    pub fn retaining(&self) -> Self {
        Self::new(self.backend.clone().into_retaining(), self.default_ttl)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Get a value; an undecodable entry reads as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(json) = self.backend.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Dropping undecodable cache entry");
                self.backend.delete(key).await?;
                Ok(None)
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Cache(format!("serialization error: {}", e)))?;
        self.backend.set(key, json, ttl_seconds).await
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.backend.delete(key).await
    }

    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.backend.get(key).await?.is_some())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.backend.ping().await
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::memory(
            crate::config::DEFAULT_GENERATION_CACHE_MAX_ENTRIES,
            DEFAULT_GENERATION_CACHE_TTL_SECONDS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_fresh_value() {
        let cache = Cache::memory(10, 60);
        cache.set("paris_3d_budget_cultural", &vec![1, 2, 3]).await.unwrap();

        let value: Option<Vec<i32>> = cache.get("paris_3d_budget_cultural").await.unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
        assert!(cache.exists("paris_3d_budget_cultural").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let backend = Arc::new(MemoryBackend::new(10));
        let cache = Cache::new(backend.clone(), 60);

        cache.set_with_ttl("gone", &"value", 0).await.unwrap();
        let value: Option<String> = cache.get("gone").await.unwrap();

        assert!(value.is_none());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = Cache::memory(10, 60);
        cache.set("k", &1).await.unwrap();
        cache.set("k", &2).await.unwrap();
        assert_eq!(cache.get::<i32>("k").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_full_cache_evicts_oldest() {
        let backend = Arc::new(MemoryBackend::new(2));
        let cache = Cache::new(backend.clone(), 60);

        cache.set("first", &1).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.set("second", &2).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.set("third", &3).await.unwrap();

        assert_eq!(backend.len(), 2);
        assert_eq!(cache.get::<i32>("first").await.unwrap(), None);
        assert_eq!(cache.get::<i32>("third").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_full_cache_purges_expired_first() {
        let backend = Arc::new(MemoryBackend::new(2));
        let cache = Cache::new(backend.clone(), 60);

        cache.set("keep", &1).await.unwrap();
        cache.set_with_ttl("stale", &2, 0).await.unwrap();
        cache.set("new", &3).await.unwrap();

        assert_eq!(cache.get::<i32>("keep").await.unwrap(), Some(1));
        assert_eq!(cache.get::<i32>("new").await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_retaining_cache_keeps_live_entries() {
        let shared = Cache::memory(2, 60);
        let revocations = shared.retaining();

        revocations.set("revoked:a", &true).await.unwrap();
        for key in ["lima", "oslo", "rome"] {
            shared.set(key, &1).await.unwrap();
        }
        revocations.set("revoked:b", &true).await.unwrap();
        revocations.set("revoked:c", &true).await.unwrap();

        assert!(revocations.exists("revoked:a").await.unwrap());
        assert!(revocations.exists("revoked:c").await.unwrap());
        assert!(!shared.exists("revoked:a").await.unwrap());
    }

    #[tokio::test]
    async fn test_retaining_backend_still_purges_expired() {
        let backend = Arc::new(MemoryBackend::retaining(2));
        let cache = Cache::new(backend.clone(), 60);

        cache.set_with_ttl("stale", &1, 0).await.unwrap();
        cache.set("keep", &2).await.unwrap();
        cache.set("new", &3).await.unwrap();

        assert_eq!(backend.len(), 2);
        assert_eq!(cache.get::<i32>("keep").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_bound_holds_under_concurrency() {
        let backend = Arc::new(MemoryBackend::new(16));
        let cache = Cache::new(backend.clone(), 60);

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.set(&format!("key-{}", i), &i).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert!(backend.len() <= 16);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let backend = Arc::new(MemoryBackend::new(4));
        backend.set("k", "not json".to_string(), 60).await.unwrap();
        let cache = Cache::new(backend.clone(), 60);

        assert_eq!(cache.get::<i32>("k").await.unwrap(), None);
        assert!(backend.is_empty());
    }
}
