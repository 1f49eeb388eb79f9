//! Result cache keys and the in-process implementations of [`ResultCache`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use moka::Expiry;
use moka::future::Cache;

use crate::error::AppError;
use crate::models::Job;
use crate::traits::ResultCache;

/// Default lifetime of a cached result set.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

const DEFAULT_MAX_ENTRIES: u64 = 1_000;

/// Normalized `(query, location)` pair: trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub location: String,
}

impl CacheKey {
    pub fn new(query: &str, location: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            location: location.trim().to_lowercase(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.query, self.location)
    }
}

#[derive(Clone)]
struct CachedJobs {
    jobs: Arc<Vec<Job>>,
    ttl: Duration,
    expires_at: DateTime<Utc>,
}

/// Evicts each entry after its own TTL.
struct EntryTtl;

impl Expiry<CacheKey, CachedJobs> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CachedJobs,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CachedJobs,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process result cache backed by `moka`.
///
/// Moka evicts entries in the background; reads additionally compare
/// against the stored expiry so an entry past its deadline is never served.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<CacheKey, CachedJobs>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryTtl)
            .build();
        Self { entries }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<Job>>, AppError> {
        let Some(entry) = self.entries.get(key).await else {
            return Ok(None);
        };
        if entry.expires_at <= Utc::now() {
            self.entries.invalidate(key).await;
            return Ok(None);
        }
        Ok(Some(entry.jobs.as_ref().clone()))
    }

    async fn put(&self, key: &CacheKey, jobs: &[Job], ttl: Duration) -> Result<(), AppError> {
        let ttl_delta = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::CacheError(format!("Invalid TTL {ttl:?}: {e}")))?;
        let entry = CachedJobs {
            jobs: Arc::new(jobs.to_vec()),
            ttl,
            expires_at: Utc::now() + ttl_delta,
        };
        self.entries.insert(key.clone(), entry).await;
        Ok(())
    }
}

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl ResultCache for NullCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Vec<Job>>, AppError> {
        Ok(None)
    }

    async fn put(&self, _key: &CacheKey, _jobs: &[Job], _ttl: Duration) -> Result<(), AppError> {
        Ok(())
    }
}
