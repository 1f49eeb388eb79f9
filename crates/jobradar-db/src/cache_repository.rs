use std::time::Duration;

use jobradar_core::cache::CacheKey;
use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::traits::ResultCache;
use sqlx::{PgPool, Pool, Postgres};

/// PostgreSQL-backed result cache, one row per normalized (query, location).
#[derive(Clone)]
pub struct JobCacheRepository {
    pool: Pool<Postgres>,
}

impl JobCacheRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete every expired row. Returns the number of rows removed.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM job_cache WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(result.rows_affected())
    }

    /// Number of live (unexpired) entries.
    pub async fn live_entries(&self) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM job_cache WHERE expires_at > NOW()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(row.0)
    }
}

impl ResultCache for JobCacheRepository {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<Job>>, AppError> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            r#"
            SELECT jobs
            FROM job_cache
            WHERE query = $1 AND location = $2 AND expires_at > NOW()
            "#,
        )
        .bind(&key.query)
        .bind(&key.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::CacheError(e.to_string()))?;

        row.map(|(jobs,)| serde_json::from_value(jobs).map_err(AppError::from))
            .transpose()
    }

    async fn put(&self, key: &CacheKey, jobs: &[Job], ttl: Duration) -> Result<(), AppError> {
        let payload = serde_json::to_value(jobs)?;

        sqlx::query(
            r#"
            INSERT INTO job_cache (query, location, jobs, expires_at, updated_at)
            VALUES ($1, $2, $3, NOW() + make_interval(secs => $4), NOW())
            ON CONFLICT (query, location) DO UPDATE SET
                jobs = EXCLUDED.jobs,
                expires_at = EXCLUDED.expires_at,
                updated_at = NOW()
            "#,
        )
        .bind(&key.query)
        .bind(&key.location)
        .bind(&payload)
        .bind(ttl.as_secs_f64())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::CacheError(e.to_string()))?;

        match self.purge_expired().await {
            Ok(0) => {}
            Ok(purged) => tracing::debug!(purged, "Purged expired cache rows"),
            Err(e) => tracing::warn!(error = %e, "Failed to purge expired cache rows"),
        }
        Ok(())
    }
}
