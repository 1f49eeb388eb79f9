use std::time::Duration;

use jobradar_core::cache::{CacheKey, MemoryCache, NullCache};
use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::traits::ResultCache;

use crate::cache_repository::JobCacheRepository;
use crate::config::DatabaseConfig;
use crate::database::Database;

/// The result cache a binary runs with, chosen at startup.
#[derive(Clone)]
pub enum CacheBackend {
    Memory(MemoryCache),
    Postgres(JobCacheRepository),
    Disabled(NullCache),
}

impl CacheBackend {
    /// PostgreSQL when `DATABASE_URL` is set (connecting and migrating),
    /// otherwise an in-process cache.
    pub async fn from_env() -> Result<Self, AppError> {
        match DatabaseConfig::from_env_optional()? {
            Some(config) => {
                let db = Database::connect(&config).await?;
                db.migrate().await?;
                tracing::info!("Using PostgreSQL result cache");
                Ok(CacheBackend::Postgres(db.cache_repo()))
            }
            None => {
                tracing::info!("DATABASE_URL not set, using in-memory result cache");
                Ok(CacheBackend::Memory(MemoryCache::new()))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CacheBackend::Memory(_) => "memory",
            CacheBackend::Postgres(_) => "postgres",
            CacheBackend::Disabled(_) => "disabled",
        }
    }

    /// Confirms the backing store is reachable. In-process caches always are.
    pub async fn health_check(&self) -> Result<(), AppError> {
        match self {
            CacheBackend::Postgres(repo) => repo.live_entries().await.map(|_| ()),
            CacheBackend::Memory(_) | CacheBackend::Disabled(_) => Ok(()),
        }
    }
}

impl ResultCache for CacheBackend {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<Job>>, AppError> {
        match self {
            CacheBackend::Memory(c) => c.get(key).await,
            CacheBackend::Postgres(c) => c.get(key).await,
            CacheBackend::Disabled(c) => c.get(key).await,
        }
    }

    async fn put(&self, key: &CacheKey, jobs: &[Job], ttl: Duration) -> Result<(), AppError> {
        match self {
            CacheBackend::Memory(c) => c.put(key, jobs, ttl).await,
            CacheBackend::Postgres(c) => c.put(key, jobs, ttl).await,
            CacheBackend::Disabled(c) => c.put(key, jobs, ttl).await,
        }
    }
}
