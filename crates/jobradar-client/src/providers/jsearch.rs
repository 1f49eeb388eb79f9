use std::time::Duration;

use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::normalize::normalize_all;
use jobradar_core::traits::JobProvider;
use serde_json::{Map, Value};

use super::{DEFAULT_PROVIDER_TIMEOUT, ProviderHttp, records};

const NAME: &str = "jsearch";
const DEFAULT_BASE_URL: &str = "https://jsearch.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";
const PAGE_SIZE: usize = 10;

/// JSearch via RapidAPI, restricted to India and the past week.
#[derive(Clone)]
pub struct JSearchProvider {
    http: ProviderHttp,
    api_key: String,
}

impl JSearchProvider {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        Self::with_timeout(api_key, DEFAULT_PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(api_key: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            http: ProviderHttp::new(DEFAULT_BASE_URL, timeout)?,
            api_key: api_key.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

impl JobProvider for JSearchProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str, location: &str) -> Result<Vec<Job>, AppError> {
        let search = format!("{query} in {location}");
        let url = self.http.url(
            "/search",
            &[
                ("query", search.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("country", "India"),
                ("date_posted", "week"),
            ],
        )?;
        let request = self
            .http
            .get(url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST);
        let body = self.http.send_json(request).await?;
        parse_jsearch(&body)
    }
}

pub fn parse_jsearch(body: &Value) -> Result<Vec<Job>, AppError> {
    let data = records(body, "data", NAME)?;
    let remapped: Vec<Value> = data.iter().take(PAGE_SIZE).map(remap).collect();
    Ok(normalize_all(&remapped, NAME, PAGE_SIZE))
}

/// Rename JSearch's `job_*` fields to the canonical record shape.
fn remap(raw: &Value) -> Value {
    let mut out = Map::new();
    let mut copy = |from: &str, to: &str| {
        if let Some(v) = raw.get(from).filter(|v| !is_blank(v)) {
            out.insert(to.to_string(), v.clone());
        }
    };
    copy("job_title", "title");
    copy("employer_name", "company");
    copy("job_salary", "salary");
    copy("job_description", "description");
    copy("job_apply_link", "url");
    copy("job_posted_at_datetime_utc", "created");

    let location = raw
        .get("job_city")
        .filter(|v| !is_blank(v))
        .or_else(|| raw.get("job_country").filter(|v| !is_blank(v)));
    if let Some(location) = location {
        out.insert("location".to_string(), location.clone());
    }
    Value::Object(out)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
