//! Test utilities: mock implementations of the core traits and job builders.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::CacheKey;
use crate::error::AppError;
use crate::models::{Badge, Job};
use crate::traits::{JobProvider, ResultCache, TextGenerator};

// ---------------------------------------------------------------------------
// Job builders
// ---------------------------------------------------------------------------

/// Minimal job with the given identity fields.
pub fn make_job(id: &str, title: &str, company: &str, source: &str) -> Job {
    JobBuilder::new(id, title)
        .company(company)
        .source(source)
        .build()
}

/// Fluent builder for test jobs. The source defaults to the id prefix
/// (`"adzuna-3"` → `"adzuna"`).
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(id: &str, title: &str) -> Self {
        let source = id.split('-').next().unwrap_or(id).to_string();
        Self {
            job: Job {
                id: id.to_string(),
                title: title.to_string(),
                company: "Unknown".to_string(),
                location: "Remote".to_string(),
                salary: "Not disclosed".to_string(),
                description: String::new(),
                url: "#".to_string(),
                tags: vec![source.to_uppercase()],
                source,
                posted: "Just now".to_string(),
                badge: Badge::None,
            },
        }
    }

    pub fn company(mut self, company: &str) -> Self {
        self.job.company = company.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.job.location = location.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.job.description = description.to_string();
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.job.source = source.to_string();
        self.job.tags = vec![source.to_uppercase()];
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

// ---------------------------------------------------------------------------
// MockProvider
// ---------------------------------------------------------------------------

/// Mock provider returning a fixed job list and recording every call.
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    jobs: Vec<Job>,
    /// Queue of errors. Each call pops the first one; once empty, calls succeed.
    errors: Arc<Mutex<Vec<AppError>>>,
    delay: Duration,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockProvider {
    pub fn new(name: &str, jobs: Vec<Job>) -> Self {
        Self {
            name: name.to_string(),
            jobs,
            errors: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose first call fails with `error`.
    pub fn failing(name: &str, error: AppError) -> Self {
        let provider = Self::new(name, Vec::new());
        provider.errors.lock().unwrap().push(error);
        provider
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl JobProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, location: &str) -> Result<Vec<Job>, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), location.to_string()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let error = {
            let mut errors = self.errors.lock().unwrap();
            if errors.is_empty() {
                None
            } else {
                Some(errors.remove(0))
            }
        };
        match error {
            Some(e) => Err(e),
            None => Ok(self.jobs.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Mock text generator with a canned response.
#[derive(Clone)]
pub struct MockGenerator {
    response: Arc<Mutex<Option<Result<String, AppError>>>>,
    fallback: String,
    delay: Duration,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    /// Always answers `text`.
    pub fn new(text: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            fallback: text.to_string(),
            delay: Duration::ZERO,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails once with `error`, then answers `"[]"`.
    pub fn with_error(error: AppError) -> Self {
        let generator = Self::new("[]");
        *generator.response.lock().unwrap() = Some(Err(error));
        generator
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let queued = self.response.lock().unwrap().take();
        queued.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

// ---------------------------------------------------------------------------
// FailingCache
// ---------------------------------------------------------------------------

/// Cache whose reads and writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCache;

impl ResultCache for FailingCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<Vec<Job>>, AppError> {
        Err(AppError::CacheError("store unreachable".into()))
    }

    async fn put(&self, _key: &CacheKey, _jobs: &[Job], _ttl: Duration) -> Result<(), AppError> {
        Err(AppError::CacheError("store unreachable".into()))
    }
}
