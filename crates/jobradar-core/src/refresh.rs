use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::search::SearchService;
use crate::traits::{JobProvider, ResultCache, TextGenerator};

pub const DEFAULT_REFRESH_QUERY: &str = "Node.js MERN Stack";
pub const DEFAULT_REFRESH_LOCATION: &str = "Bengaluru, Remote";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// What the background refresh searches for, and how often.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub worker_id: String,
    pub query: String,
    pub location: String,
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            worker_id: format!("refresh-{}", Uuid::new_v4()),
            query: DEFAULT_REFRESH_QUERY.to_string(),
            location: DEFAULT_REFRESH_LOCATION.to_string(),
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Events emitted by the refresh worker for monitoring/logging.
#[derive(Debug, Clone)]
pub enum RefreshEvent<'a> {
    Started {
        worker_id: &'a str,
    },
    RunStarted {
        query: &'a str,
        location: &'a str,
    },
    RunCompleted {
        jobs: usize,
        source: &'a str,
        cached: bool,
    },
    Stopped {
        worker_id: &'a str,
        runs: u64,
    },
}

/// Trait for receiving refresh events (decoupled logging).
pub trait RefreshReporter: Send + Sync {
    fn report(&self, event: RefreshEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRefreshReporter;

impl RefreshReporter for TracingRefreshReporter {
    fn report(&self, event: RefreshEvent<'_>) {
        match event {
            RefreshEvent::Started { worker_id } => {
                tracing::info!(%worker_id, "Refresh worker started");
            }
            RefreshEvent::RunStarted { query, location } => {
                tracing::info!(%query, %location, "Background refresh running");
            }
            RefreshEvent::RunCompleted {
                jobs,
                source,
                cached,
            } => {
                tracing::info!(%jobs, %source, %cached, "Background refresh complete");
            }
            RefreshEvent::Stopped { worker_id, runs } => {
                tracing::info!(%worker_id, %runs, "Refresh worker stopped");
            }
        }
    }
}

/// Periodically re-runs a fixed search so its cache entry stays warm.
///
/// Goes through the regular [`SearchService::search`] path; a run that
/// finds a live cache entry is served from it like any other caller.
pub struct RefreshWorker<P, G, C>
where
    P: JobProvider,
    G: TextGenerator,
    C: ResultCache,
{
    service: Arc<SearchService<P, G, C>>,
    config: RefreshConfig,
}

impl<P, G, C> RefreshWorker<P, G, C>
where
    P: JobProvider,
    G: TextGenerator,
    C: ResultCache,
{
    pub fn new(service: Arc<SearchService<P, G, C>>, config: RefreshConfig) -> Self {
        Self { service, config }
    }

    /// Run one refresh immediately, then one per interval, until cancelled.
    ///
    /// Cancellation is observed between runs; a run in progress completes.
    pub async fn run<R: RefreshReporter>(&self, cancel_token: CancellationToken, reporter: &R) {
        reporter.report(RefreshEvent::Started {
            worker_id: &self.config.worker_id,
        });

        let mut runs = 0u64;
        loop {
            if cancel_token.is_cancelled() {
                break;
            }

            reporter.report(RefreshEvent::RunStarted {
                query: &self.config.query,
                location: &self.config.location,
            });
            let result = self
                .service
                .search(Some(&self.config.query), Some(&self.config.location))
                .await;
            runs += 1;
            reporter.report(RefreshEvent::RunCompleted {
                jobs: result.jobs.len(),
                source: &result.source,
                cached: result.cached,
            });

            tokio::select! {
                () = tokio::time::sleep(self.config.interval) => {}
                () = cancel_token.cancelled() => break,
            }
        }

        reporter.report(RefreshEvent::Stopped {
            worker_id: &self.config.worker_id,
            runs,
        });
    }
}
