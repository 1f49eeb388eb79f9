use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position-based highlight assigned by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Featured,
    New,
    None,
}

impl Badge {
    /// Badge for the record at `index` in its provider's own result order.
    pub fn for_position(index: usize) -> Self {
        match index {
            0 | 1 => Badge::Featured,
            2 | 3 => Badge::New,
            _ => Badge::None,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Badge::Featured => write!(f, "featured"),
            Badge::New => write!(f, "new"),
            Badge::None => write!(f, "none"),
        }
    }
}

/// Canonical job posting every provider is normalized into.
///
/// All fields are always populated; absent provider data is replaced with
/// defaults by [`crate::normalize::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// `"{source}-{position}"`, stable within one aggregation run.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text, provider dependent.
    pub salary: String,
    /// Plain text, tags stripped, at most 300 characters.
    pub description: String,
    pub url: String,
    pub source: String,
    pub tags: Vec<String>,
    pub posted: String,
    pub badge: Badge,
}

/// Final answer of one search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub jobs: Vec<Job>,
    /// Providers that contributed to `jobs`, or `"none"`.
    pub source: String,
    pub served_at: DateTime<Utc>,
    /// True when the jobs came straight from the result cache.
    pub cached: bool,
}

impl SearchResult {
    pub fn new(jobs: Vec<Job>, cached: bool) -> Self {
        let source = provenance_label(&jobs);
        Self {
            jobs,
            source,
            served_at: Utc::now(),
            cached,
        }
    }
}

/// Distinct `source` values in first-appearance order, joined by `", "`.
pub fn provenance_label(jobs: &[Job]) -> String {
    let mut sources: Vec<&str> = Vec::new();
    for job in jobs {
        if !sources.contains(&job.source.as_str()) {
            sources.push(&job.source);
        }
    }
    if sources.is_empty() {
        "none".to_string()
    } else {
        sources.join(", ")
    }
}
