use futures::future::join_all;

use crate::models::Job;
use crate::traits::JobProvider;

/// Outcome of one fan-out across all providers.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Successful providers' jobs, concatenated in declaration order.
    pub jobs: Vec<Job>,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Queries every configured provider concurrently and merges the successes.
pub struct Aggregator<P: JobProvider> {
    providers: Vec<P>,
}

impl<P: JobProvider> Aggregator<P> {
    pub fn new(providers: Vec<P>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[P] {
        &self.providers
    }

    /// Run all providers and wait for every one of them to settle.
    ///
    /// A failing provider is logged and skipped; the call itself never fails
    /// and yields an empty list when nothing succeeded.
    pub async fn collect(&self, query: &str, location: &str) -> Aggregation {
        let results = join_all(
            self.providers
                .iter()
                .map(|provider| provider.search(query, location)),
        )
        .await;

        let mut aggregation = Aggregation::default();
        for (provider, result) in self.providers.iter().zip(results) {
            match result {
                Ok(jobs) => {
                    tracing::info!(
                        provider = provider.name(),
                        count = jobs.len(),
                        "Provider returned jobs"
                    );
                    aggregation.succeeded.push(provider.name().to_string());
                    aggregation.jobs.extend(jobs);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        transport = e.is_transport(),
                        "Provider failed"
                    );
                    aggregation.failed.push(provider.name().to_string());
                }
            }
        }

        tracing::info!(
            total = aggregation.jobs.len(),
            succeeded = aggregation.succeeded.len(),
            failed = aggregation.failed.len(),
            "Aggregation complete"
        );
        aggregation
    }
}
