use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobradar_core::models::{Job, SearchResult};

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Search keywords. Defaults to "Node.js MERN Stack".
    pub query: Option<String>,
    /// Location. Defaults to "Bengaluru".
    pub location: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub tags: Vec<String>,
    pub posted: String,
    /// `featured`, `new` or `none`.
    pub badge: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            badge: job.badge.to_string(),
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            salary: job.salary,
            description: job.description,
            url: job.url,
            source: job.source,
            tags: job.tags,
            posted: job.posted,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SearchResponse {
    pub timestamp: DateTime<Utc>,
    pub total: usize,
    /// Contributing providers, comma separated, or "none".
    pub source: String,
    pub cached: bool,
    pub jobs: Vec<JobResponse>,
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            timestamp: result.served_at,
            total: result.jobs.len(),
            source: result.source,
            cached: result.cached,
            jobs: result.jobs.into_iter().map(JobResponse::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Cache backend in use: `memory`, `postgres` or `disabled`.
    pub cache: &'static str,
    pub providers: Vec<String>,
    pub ranking: bool,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
