//! HTTP adapters for the supported job boards.

mod adzuna;
mod jsearch;
mod remotive;
mod themuse;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use jobradar_core::error::AppError;
use jobradar_core::models::Job;
use jobradar_core::traits::JobProvider;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

pub use adzuna::{AdzunaProvider, parse_adzuna};
pub use jsearch::{JSearchProvider, parse_jsearch};
pub use remotive::{RemotiveProvider, parse_remotive};
pub use themuse::{TheMuseProvider, parse_themuse};

/// Default per-request timeout for provider calls.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(15);

/// Identifies one of the supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Adzuna,
    JSearch,
    Remotive,
    TheMuse,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Adzuna => "adzuna",
            ProviderKind::JSearch => "jsearch",
            ProviderKind::Remotive => "remotive",
            ProviderKind::TheMuse => "themuse",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adzuna" => Ok(ProviderKind::Adzuna),
            "jsearch" => Ok(ProviderKind::JSearch),
            "remotive" => Ok(ProviderKind::Remotive),
            "themuse" => Ok(ProviderKind::TheMuse),
            other => Err(AppError::ConfigError(format!("Unknown provider '{other}'"))),
        }
    }
}

/// Any of the supported providers, so they can share one list.
#[derive(Clone)]
pub enum ProviderClient {
    Adzuna(AdzunaProvider),
    JSearch(JSearchProvider),
    Remotive(RemotiveProvider),
    TheMuse(TheMuseProvider),
}

impl ProviderClient {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderClient::Adzuna(_) => ProviderKind::Adzuna,
            ProviderClient::JSearch(_) => ProviderKind::JSearch,
            ProviderClient::Remotive(_) => ProviderKind::Remotive,
            ProviderClient::TheMuse(_) => ProviderKind::TheMuse,
        }
    }
}

impl JobProvider for ProviderClient {
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    async fn search(&self, query: &str, location: &str) -> Result<Vec<Job>, AppError> {
        match self {
            ProviderClient::Adzuna(p) => p.search(query, location).await,
            ProviderClient::JSearch(p) => p.search(query, location).await,
            ProviderClient::Remotive(p) => p.search(query, location).await,
            ProviderClient::TheMuse(p) => p.search(query, location).await,
        }
    }
}

/// reqwest client plus base URL shared by every adapter.
#[derive(Clone)]
pub(crate) struct ProviderHttp {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl ProviderHttp {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent("JobRadar/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
        })
    }

    pub(crate) fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// `{base_url}{path}` with the given query parameters, percent-encoded.
    pub(crate) fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, AppError> {
        Url::parse_with_params(&format!("{}{path}", self.base_url), params)
            .map_err(|e| AppError::ConfigError(format!("Invalid provider URL: {e}")))
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    /// Send the request and decode a JSON body. Non-2xx statuses are errors.
    pub(crate) async fn send_json(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "Provider responded");
        if status.as_u16() == 429 {
            return Err(AppError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} from {}",
                status.as_u16(),
                response.url()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to decode response body: {e}")))
    }
}

/// The array at `field`, or a provider error naming what was missing.
pub(crate) fn records<'a>(
    body: &'a Value,
    field: &str,
    provider: &str,
) -> Result<&'a [Value], AppError> {
    let items = body
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::provider(provider, format!("response has no '{field}' array")))?;
    tracing::debug!(provider, count = items.len(), "Decoded provider records");
    Ok(items.as_slice())
}
