//! Best-effort relevance ranking through a text-generation service.
//!
//! The ranker never fails: when it is unavailable, times out, or gets an
//! unusable answer, it hands back the input order unchanged.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::error::AppError;
use crate::models::Job;
use crate::traits::TextGenerator;

pub const DEFAULT_RANKING_TIMEOUT: Duration = Duration::from_secs(30);

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?\s*").expect("valid fence regex"));
static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid array regex"));

/// Target profile the ranking prompt describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Who the ranker works for, e.g. "a JavaScript/TypeScript developer".
    pub persona: String,
    pub keep: Vec<String>,
    pub drop: Vec<String>,
    /// Most preferred first.
    pub preference: Vec<String>,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            persona: "a JavaScript/TypeScript developer".to_string(),
            keep: vec![
                "JavaScript, TypeScript, Node.js, Express, MERN, React, Next.js, NestJS, Fastify"
                    .to_string(),
                "Full-stack or backend roles using the JS/TS ecosystem".to_string(),
            ],
            drop: vec![
                "Java, Python, PHP, Ruby, .NET, C++, C#, Go, Rust, Swift, Kotlin".to_string(),
                "Data Science, ML, DevOps-only, QA-only, non-tech roles".to_string(),
                "Any non-JS/TS tech stack".to_string(),
            ],
            preference: [
                "Node.js",
                "MERN",
                "JavaScript",
                "TypeScript",
                "React",
                "Full-stack JS",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Serialize)]
struct PromptJob<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
}

/// Build the filter-and-rank prompt for `jobs`.
pub fn build_prompt(
    jobs: &[Job],
    query: &str,
    policy: &RankingPolicy,
) -> Result<String, AppError> {
    let listing: Vec<PromptJob<'_>> = jobs
        .iter()
        .map(|j| PromptJob {
            id: &j.id,
            title: &j.title,
            description: &j.description,
        })
        .collect();

    let bullets = |items: &[String]| {
        items
            .iter()
            .map(|i| format!("- {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(format!(
        "You are a job filter and ranker for {persona}.\n\n\
         STEP 1 - FILTER: Keep ONLY jobs that are clearly related to:\n{keep}\n\n\
         REMOVE any jobs related to:\n{drop}\n\n\
         STEP 2 - RANK: Among the filtered jobs, rank by relevance to: \"{query}\"\n\
         Prefer: {preference}\n\n\
         Return ONLY a raw JSON array of job IDs (no markdown, no explanation):\n\
         [\"id1\", \"id2\", \"id3\"]\n\n\
         Jobs to evaluate:\n{jobs}\n",
        persona = policy.persona,
        keep = bullets(&policy.keep),
        drop = bullets(&policy.drop),
        preference = policy.preference.join(" > "),
        jobs = serde_json::to_string(&listing)?,
    ))
}

/// Extract the ranked id list from a model response.
///
/// Markdown fences and any prose around the outermost `[...]` are ignored;
/// non-string entries are skipped. Returns `None` when no array parses.
pub fn parse_ranked_ids(text: &str) -> Option<Vec<String>> {
    let cleaned = CODE_FENCE.replace_all(text, "");
    let array = JSON_ARRAY.find(cleaned.trim())?;
    let values: Vec<serde_json::Value> = serde_json::from_str(array.as_str()).ok()?;
    Some(
        values
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

/// Reorder `jobs` by `ids`. Unknown and repeated ids are skipped, jobs
/// missing from `ids` are pruned.
pub fn apply_ranking(jobs: &[Job], ids: &[String]) -> Vec<Job> {
    let by_id: HashMap<&str, &Job> = jobs.iter().map(|j| (j.id.as_str(), j)).collect();
    let mut taken = HashSet::new();
    let mut ranked = Vec::with_capacity(ids.len().min(jobs.len()));
    for id in ids {
        if let Some(job) = by_id.get(id.as_str()) {
            if taken.insert(id.as_str()) {
                ranked.push((*job).clone());
            }
        }
    }
    ranked
}

/// Relevance ranker, either backed by a text generator or a passthrough.
pub enum Ranker<G> {
    Available {
        generator: G,
        policy: RankingPolicy,
        timeout: Duration,
    },
    Unavailable,
}

impl<G: TextGenerator> Ranker<G> {
    pub fn available(generator: G) -> Self {
        Ranker::Available {
            generator,
            policy: RankingPolicy::default(),
            timeout: DEFAULT_RANKING_TIMEOUT,
        }
    }

    /// `Available` when a generator is configured, else `Unavailable`.
    pub fn from_option(generator: Option<G>) -> Self {
        generator.map_or(Ranker::Unavailable, Self::available)
    }

    pub fn with_policy(mut self, new_policy: RankingPolicy) -> Self {
        if let Ranker::Available { policy, .. } = &mut self {
            *policy = new_policy;
        }
        self
    }

    pub fn with_timeout(mut self, new_timeout: Duration) -> Self {
        if let Ranker::Available { timeout, .. } = &mut self {
            *timeout = new_timeout;
        }
        self
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Ranker::Available { .. })
    }

    /// Rank `jobs` for `query`, falling back to the input order on any failure.
    pub async fn rank(&self, jobs: Vec<Job>, query: &str) -> Vec<Job> {
        let Ranker::Available {
            generator,
            policy,
            timeout,
        } = self
        else {
            return jobs;
        };
        if jobs.is_empty() {
            return jobs;
        }

        match Self::try_rank(generator, policy, *timeout, &jobs, query).await {
            Ok(ranked) if !ranked.is_empty() => {
                tracing::info!(
                    input = jobs.len(),
                    ranked = ranked.len(),
                    "Ranking applied"
                );
                ranked
            }
            Ok(_) => {
                tracing::warn!("Ranking matched no known jobs, keeping unranked order");
                jobs
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ranking failed, keeping unranked order");
                jobs
            }
        }
    }

    async fn try_rank(
        generator: &G,
        policy: &RankingPolicy,
        timeout: Duration,
        jobs: &[Job],
        query: &str,
    ) -> Result<Vec<Job>, AppError> {
        let prompt = build_prompt(jobs, query, policy)?;
        let text = tokio::time::timeout(timeout, generator.generate(&prompt))
            .await
            .map_err(|_| AppError::Timeout(timeout.as_secs()))??;

        let ids = parse_ranked_ids(&text).ok_or_else(|| {
            AppError::Generic(format!(
                "No JSON id array in ranking response: {:.120}",
                text
            ))
        })?;
        Ok(apply_ranking(jobs, &ids))
    }
}
