//! Environment-driven construction of providers and the ranking client.

use std::time::Duration;

use jobradar_core::error::AppError;

use crate::llm::{self, OpenAiGenerator};
use crate::providers::{
    AdzunaProvider, DEFAULT_PROVIDER_TIMEOUT, JSearchProvider, ProviderClient, ProviderKind,
    RemotiveProvider, TheMuseProvider,
};

const DEFAULT_PROVIDERS: &str = "adzuna,jsearch";

/// Which providers to query and their credentials.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub enabled: Vec<ProviderKind>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub rapidapi_key: Option<String>,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Reads `JOBRADAR_PROVIDERS`, `ADZUNA_APP_ID`, `ADZUNA_APP_KEY` and
    /// `RAPIDAPI_KEY`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let list = non_empty(lookup("JOBRADAR_PROVIDERS"))
            .unwrap_or_else(|| DEFAULT_PROVIDERS.to_string());

        let mut enabled = Vec::new();
        for name in list.split(',').filter(|s| !s.trim().is_empty()) {
            let kind: ProviderKind = name.parse()?;
            if !enabled.contains(&kind) {
                enabled.push(kind);
            }
        }

        Ok(Self {
            enabled,
            adzuna_app_id: non_empty(lookup("ADZUNA_APP_ID")),
            adzuna_app_key: non_empty(lookup("ADZUNA_APP_KEY")),
            rapidapi_key: non_empty(lookup("RAPIDAPI_KEY")),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        })
    }

    /// Names the variables `kind` still needs, if any.
    fn missing_credentials(&self, kind: ProviderKind) -> Option<&'static str> {
        match kind {
            ProviderKind::Adzuna
                if self.adzuna_app_id.is_none() || self.adzuna_app_key.is_none() =>
            {
                Some("ADZUNA_APP_ID and ADZUNA_APP_KEY")
            }
            ProviderKind::JSearch if self.rapidapi_key.is_none() => Some("RAPIDAPI_KEY"),
            _ => None,
        }
    }

    /// Build one client per enabled provider, in the configured order.
    ///
    /// Providers without their credentials are skipped with a warning so the
    /// remaining boards are still queried.
    pub fn build(&self) -> Result<Vec<ProviderClient>, AppError> {
        let mut clients = Vec::with_capacity(self.enabled.len());
        for &kind in &self.enabled {
            if let Some(missing) = self.missing_credentials(kind) {
                tracing::warn!(provider = %kind, "Skipping provider, {missing} not set");
                continue;
            }
            let client = match kind {
                ProviderKind::Adzuna => ProviderClient::Adzuna(AdzunaProvider::with_timeout(
                    self.adzuna_app_id.as_deref().unwrap_or_default(),
                    self.adzuna_app_key.as_deref().unwrap_or_default(),
                    self.timeout,
                )?),
                ProviderKind::JSearch => ProviderClient::JSearch(JSearchProvider::with_timeout(
                    self.rapidapi_key.as_deref().unwrap_or_default(),
                    self.timeout,
                )?),
                ProviderKind::Remotive => {
                    ProviderClient::Remotive(RemotiveProvider::with_timeout(self.timeout)?)
                }
                ProviderKind::TheMuse => {
                    ProviderClient::TheMuse(TheMuseProvider::with_timeout(self.timeout)?)
                }
            };
            clients.push(client);
        }
        Ok(clients)
    }
}

/// Ranking backend configuration. Ranking is disabled when no key is set.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl LlmSettings {
    /// Reads `JOBRADAR_LLM_API_KEY` (falling back to `GROQ_API_KEY`),
    /// `JOBRADAR_LLM_BASE_URL` and `JOBRADAR_LLM_MODEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: non_empty(lookup("JOBRADAR_LLM_API_KEY"))
                .or_else(|| non_empty(lookup("GROQ_API_KEY"))),
            base_url: non_empty(lookup("JOBRADAR_LLM_BASE_URL"))
                .unwrap_or_else(|| llm::DEFAULT_BASE_URL.to_string()),
            model: non_empty(lookup("JOBRADAR_LLM_MODEL"))
                .unwrap_or_else(|| llm::DEFAULT_MODEL.to_string()),
        }
    }

    /// The generator, or `None` when ranking is not configured.
    pub fn build(&self) -> Result<Option<OpenAiGenerator>, AppError> {
        self.api_key
            .as_deref()
            .map(|key| OpenAiGenerator::with_base_url(key, &self.model, &self.base_url))
            .transpose()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
