use std::sync::Arc;

use jobradar_client::{OpenAiGenerator, ProviderClient};
use jobradar_core::search::SearchService;
use jobradar_db::CacheBackend;

/// The concrete search pipeline the server runs.
pub type JobSearch = SearchService<ProviderClient, OpenAiGenerator, CacheBackend>;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub search: Arc<JobSearch>,
}

impl AppState {
    pub fn new(search: Arc<JobSearch>) -> Self {
        Self { search }
    }
}
