//! Keyword inclusion rules applied to the aggregated job set.
//!
//! Every rule is a pure predicate over a [`Job`] and a [`FilterConfig`], so
//! profiles can be swapped (or loaded from JSON) without touching the
//! pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Job;

/// How an excluded employment-type keyword in the title is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypePolicy {
    /// Reject unless title or description also names an explicit type.
    #[default]
    ExplicitOverride,
    /// Reject whenever an excluded keyword appears in the title.
    Strict,
}

/// Keyword sets describing the target profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// At least one must occur in the title or the description.
    pub stack_keywords: Vec<String>,
    /// Location or title containing one of these counts as remote.
    pub remote_keywords: Vec<String>,
    /// Providers whose listings are remote by construction.
    pub remote_sources: Vec<String>,
    /// City names and aliases accepted besides remote work.
    pub target_cities: Vec<String>,
    pub excluded_type_keywords: Vec<String>,
    pub explicit_type_keywords: Vec<String>,
    pub type_policy: TypePolicy,
}

impl Default for FilterConfig {
    /// Node.js / MERN roles, Bengaluru or remote, full-time.
    fn default() -> Self {
        Self {
            stack_keywords: strings(&[
                "node",
                "mern",
                "react",
                "fullstack",
                "node.js",
                "mongodb",
                "express.js",
            ]),
            remote_keywords: strings(&["remote"]),
            remote_sources: strings(&["remotive", "arbeitnow"]),
            target_cities: strings(&["bengaluru", "bangalore"]),
            excluded_type_keywords: strings(&["intern", "part-time", "parttime"]),
            explicit_type_keywords: strings(&["full-time", "fulltime"]),
            type_policy: TypePolicy::ExplicitOverride,
        }
    }
}

impl FilterConfig {
    /// Load a profile from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read filter config {}: {e}",
                path.display()
            ))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Case-insensitive substring test against any keyword.
fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| haystack.contains(&k.to_lowercase()))
}

pub fn matches_stack(job: &Job, config: &FilterConfig) -> bool {
    contains_any(&job.title, &config.stack_keywords)
        || contains_any(&job.description, &config.stack_keywords)
}

pub fn is_remote(job: &Job, config: &FilterConfig) -> bool {
    contains_any(&job.location, &config.remote_keywords)
        || contains_any(&job.title, &config.remote_keywords)
        || config
            .remote_sources
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&job.source))
}

pub fn is_target_city(job: &Job, config: &FilterConfig) -> bool {
    contains_any(&job.location, &config.target_cities)
        || contains_any(&job.title, &config.target_cities)
}

pub fn matches_location(job: &Job, config: &FilterConfig) -> bool {
    is_remote(job, config) || is_target_city(job, config)
}

pub fn matches_employment_type(job: &Job, config: &FilterConfig) -> bool {
    if !contains_any(&job.title, &config.excluded_type_keywords) {
        return true;
    }
    match config.type_policy {
        TypePolicy::Strict => false,
        TypePolicy::ExplicitOverride => {
            contains_any(&job.title, &config.explicit_type_keywords)
                || contains_any(&job.description, &config.explicit_type_keywords)
        }
    }
}

/// True when the job satisfies the stack, location and employment-type rules.
pub fn matches(job: &Job, config: &FilterConfig) -> bool {
    matches_stack(job, config)
        && matches_location(job, config)
        && matches_employment_type(job, config)
}

/// Retain the jobs matching every rule, preserving order.
pub fn apply_filter(jobs: Vec<Job>, config: &FilterConfig) -> Vec<Job> {
    jobs.into_iter().filter(|job| matches(job, config)).collect()
}
