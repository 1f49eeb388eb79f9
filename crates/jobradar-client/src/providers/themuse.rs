use std::time::Duration;

use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::normalize::normalize_all;
use jobradar_core::traits::JobProvider;
use serde_json::{Map, Value};

use super::{DEFAULT_PROVIDER_TIMEOUT, ProviderHttp, records};

const NAME: &str = "themuse";
const DEFAULT_BASE_URL: &str = "https://www.themuse.com/api";
const PAGE_SIZE: usize = 10;

/// The Muse public jobs feed. The API has no keyword search, so the newest
/// page is fetched and filtered locally by title.
#[derive(Clone)]
pub struct TheMuseProvider {
    http: ProviderHttp,
}

impl TheMuseProvider {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            http: ProviderHttp::new(DEFAULT_BASE_URL, timeout)?,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

impl JobProvider for TheMuseProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str, _location: &str) -> Result<Vec<Job>, AppError> {
        let url = self
            .http
            .url("/public/jobs", &[("page", "1"), ("descending", "true")])?;
        let body = self.http.send_json(self.http.get(url)).await?;
        parse_themuse(&body, query)
    }
}

/// Keep results whose `name` contains `query` (case-insensitive), then remap.
pub fn parse_themuse(body: &Value, query: &str) -> Result<Vec<Job>, AppError> {
    let needle = query.to_lowercase();
    let matching: Vec<Value> = records(body, "results", NAME)?
        .iter()
        .filter(|r| {
            r.get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .take(PAGE_SIZE)
        .map(remap)
        .collect();
    tracing::debug!(provider = NAME, query, matching = matching.len(), "Filtered by title");
    Ok(normalize_all(&matching, NAME, PAGE_SIZE))
}

fn remap(raw: &Value) -> Value {
    let mut out = Map::new();
    if let Some(name) = raw.get("name") {
        out.insert("title".to_string(), name.clone());
    }
    if let Some(company) = raw.get("company").and_then(|c| c.get("name")) {
        out.insert("company".to_string(), company.clone());
    }
    for (from, to) in [
        ("locations", "locations"),
        ("contents", "description"),
        ("refs", "refs"),
        ("publication_date", "created"),
    ] {
        if let Some(v) = raw.get(from) {
            out.insert(to.to_string(), v.clone());
        }
    }
    Value::Object(out)
}
