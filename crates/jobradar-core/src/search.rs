use std::time::Duration;

use crate::aggregate::Aggregator;
use crate::cache::{CacheKey, DEFAULT_CACHE_TTL};
use crate::dedup::deduplicate;
use crate::filter::{FilterConfig, apply_filter};
use crate::models::SearchResult;
use crate::rank::Ranker;
use crate::traits::{JobProvider, ResultCache, TextGenerator};

pub const DEFAULT_QUERY: &str = "Node.js MERN Stack";
pub const DEFAULT_LOCATION: &str = "Bengaluru";

/// Defaults applied to every search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub default_query: String,
    pub default_location: String,
    pub cache_ttl: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_string(),
            default_location: DEFAULT_LOCATION.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Orchestrates the search pipeline: cache → aggregate → filter → dedup → rank → cache.
///
/// Generic over providers, the ranking backend and the cache store so each
/// can be swapped or mocked independently.
pub struct SearchService<P, G, C>
where
    P: JobProvider,
    G: TextGenerator,
    C: ResultCache,
{
    aggregator: Aggregator<P>,
    filter: FilterConfig,
    ranker: Ranker<G>,
    cache: C,
    config: SearchConfig,
}

impl<P, G, C> SearchService<P, G, C>
where
    P: JobProvider,
    G: TextGenerator,
    C: ResultCache,
{
    pub fn new(providers: Vec<P>, ranker: Ranker<G>, cache: C) -> Self {
        Self {
            aggregator: Aggregator::new(providers),
            filter: FilterConfig::default(),
            ranker,
            cache,
            config: SearchConfig::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn providers(&self) -> &[P] {
        self.aggregator.providers()
    }

    pub fn ranker(&self) -> &Ranker<G> {
        &self.ranker
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Search for jobs. Missing or blank arguments fall back to the
    /// configured defaults.
    ///
    /// Always produces a result: provider, ranking and cache failures are
    /// logged and absorbed.
    pub async fn search(&self, query: Option<&str>, location: Option<&str>) -> SearchResult {
        let query = non_blank(query).unwrap_or(self.config.default_query.as_str());
        let location = non_blank(location).unwrap_or(self.config.default_location.as_str());
        let key = CacheKey::new(query, location);

        // 1. Cache
        match self.cache.get(&key).await {
            Ok(Some(jobs)) => {
                tracing::info!(%key, count = jobs.len(), "Serving from cache");
                return SearchResult::new(jobs, true);
            }
            Ok(None) => tracing::debug!(%key, "Cache miss"),
            Err(e) => tracing::warn!(%key, error = %e, "Cache read failed, treating as miss"),
        }

        // 2. Aggregate
        let aggregation = self.aggregator.collect(query, location).await;
        let fetched = aggregation.jobs.len();

        // 3. Filter
        let jobs = apply_filter(aggregation.jobs, &self.filter);
        let filtered = jobs.len();

        // 4. Deduplicate
        let jobs = deduplicate(jobs);
        tracing::info!(fetched, filtered, unique = jobs.len(), "Pipeline narrowed results");

        // 5. Rank
        let jobs = self.ranker.rank(jobs, query).await;

        // 6. Cache
        match self.cache.put(&key, &jobs, self.config.cache_ttl).await {
            Ok(()) => tracing::info!(
                %key,
                ttl_secs = self.config.cache_ttl.as_secs(),
                "Cache updated"
            ),
            Err(e) => tracing::warn!(%key, error = %e, "Cache write failed"),
        }

        SearchResult::new(jobs, false)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
