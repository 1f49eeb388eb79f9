pub mod aggregate;
pub mod cache;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod rank;
pub mod refresh;
pub mod search;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregate::{Aggregation, Aggregator};
pub use cache::{CacheKey, DEFAULT_CACHE_TTL, MemoryCache, NullCache};
pub use error::AppError;
pub use filter::{FilterConfig, TypePolicy};
pub use models::{Badge, Job, SearchResult};
pub use rank::{Ranker, RankingPolicy};
pub use refresh::{RefreshConfig, RefreshReporter, RefreshWorker, TracingRefreshReporter};
pub use search::{SearchConfig, SearchService};
pub use traits::{JobProvider, ResultCache, TextGenerator};
