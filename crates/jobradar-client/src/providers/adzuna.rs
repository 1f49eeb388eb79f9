use std::time::Duration;

use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::normalize::normalize_all;
use jobradar_core::traits::JobProvider;
use serde_json::Value;

use super::{DEFAULT_PROVIDER_TIMEOUT, ProviderHttp, records};

const NAME: &str = "adzuna";
const DEFAULT_BASE_URL: &str = "https://api.adzuna.com/v1/api";
const PAGE_SIZE: usize = 50;

/// Adzuna job search (India), page 1, postings from the last week.
#[derive(Clone)]
pub struct AdzunaProvider {
    http: ProviderHttp,
    app_id: String,
    app_key: String,
}

impl AdzunaProvider {
    pub fn new(app_id: &str, app_key: &str) -> Result<Self, AppError> {
        Self::with_timeout(app_id, app_key, DEFAULT_PROVIDER_TIMEOUT)
    }

    pub fn with_timeout(app_id: &str, app_key: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            http: ProviderHttp::new(DEFAULT_BASE_URL, timeout)?,
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

impl JobProvider for AdzunaProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str, location: &str) -> Result<Vec<Job>, AppError> {
        let page_size = PAGE_SIZE.to_string();
        let url = self.http.url(
            "/jobs/in/search/1",
            &[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("results_per_page", page_size.as_str()),
                ("what", query),
                ("where", location),
                ("max_days_old", "7"),
            ],
        )?;
        let body = self.http.send_json(self.http.get(url)).await?;
        parse_adzuna(&body)
    }
}

/// Adzuna records already use the canonical field names.
pub fn parse_adzuna(body: &Value) -> Result<Vec<Job>, AppError> {
    let results = records(body, "results", NAME)?;
    Ok(normalize_all(results, NAME, PAGE_SIZE))
}
