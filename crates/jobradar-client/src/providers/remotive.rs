use std::time::Duration;

use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::normalize::normalize_all;
use jobradar_core::traits::JobProvider;
use serde_json::Value;

use super::{DEFAULT_PROVIDER_TIMEOUT, ProviderHttp, records};

const NAME: &str = "remotive";
const DEFAULT_BASE_URL: &str = "https://remotive.com/api";
const PAGE_SIZE: usize = 10;

/// Remotive remote-jobs board. Has no location filter; no credentials.
#[derive(Clone)]
pub struct RemotiveProvider {
    http: ProviderHttp,
}

impl RemotiveProvider {
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

impl JobProvider for RemotiveProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str, _location: &str) -> Result<Vec<Job>, AppError> {
        let url = self.http.url("/remote-jobs", &[("search", query)])?;
        let body = self.http.send_json(self.http.get(url)).await?;
        parse_remotive(&body)
    }
}

pub fn parse_remotive(body: &Value) -> Result<Vec<Job>, AppError> {
    let jobs = records(body, "jobs", NAME)?;
    Ok(normalize_all(jobs, NAME, PAGE_SIZE))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_remotive_jobs() {
        let body = json!({
            "job-count": 1,
            "jobs": [{
                "title": "Full Stack Engineer (MERN)",
                "company_name": "Remote Co",
                "company": "Remote Co",
                "candidate_required_location": "Worldwide",
                "salary": "$60k - $80k",
                "url": "https://remotive.example/123",
                "description": "<div>React and Node</div>"
            }]
        });

        let jobs = parse_remotive(&body).unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "remotive-1");
        assert_eq!(jobs[0].company, "Remote Co");
        assert_eq!(jobs[0].location, "Worldwide");
        assert_eq!(jobs[0].salary, "$60k - $80k");
        assert_eq!(jobs[0].url, "https://remotive.example/123");
        assert_eq!(jobs[0].description, "React and Node");
    }

    #[test]
    fn test_parse_remotive_caps_at_ten() {
        let jobs: Vec<Value> = (0..15).map(|i| json!({ "title": format!("Job {i}") })).collect();
        assert_eq!(parse_remotive(&json!({ "jobs": jobs })).unwrap().len(), 10);
    }

    #[test]
    fn test_parse_remotive_empty() {
        assert!(parse_remotive(&json!({ "jobs": [] })).unwrap().is_empty());
        assert!(parse_remotive(&json!({})).is_err());
    }
}
