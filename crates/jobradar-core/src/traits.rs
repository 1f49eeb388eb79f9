use std::future::Future;
use std::time::Duration;

use crate::cache::CacheKey;
use crate::error::AppError;
use crate::models::Job;

/// One external job-listing source.
///
/// Implementations fetch a single page of results, cap it, and pass every
/// record through [`crate::normalize::normalize`]. Failures are returned as
/// errors; retry and isolation belong to the aggregator.
pub trait JobProvider: Send + Sync {
    /// Stable identifier, also used as the `source` of emitted jobs.
    fn name(&self) -> &str;

    fn search(
        &self,
        query: &str,
        location: &str,
    ) -> impl Future<Output = Result<Vec<Job>, AppError>> + Send;
}

/// Free-form text generation used by the ranker.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Stores ranked result sets keyed by normalized (query, location).
pub trait ResultCache: Send + Sync {
    /// Returns the cached jobs, or `None` if absent or expired.
    fn get(
        &self,
        key: &CacheKey,
    ) -> impl Future<Output = Result<Option<Vec<Job>>, AppError>> + Send;

    /// Creates or overwrites the entry, expiring `ttl` from now.
    fn put(
        &self,
        key: &CacheKey,
        jobs: &[Job],
        ttl: Duration,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}
