use std::path::PathBuf;
use std::time::Duration;

use jobradar_core::error::AppError;
use jobradar_core::filter::FilterConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REFRESH_SECS: u64 = 900;

/// Process-level settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Optional JSON filter profile.
    pub filter_config: Option<PathBuf>,
    /// Background refresh period; `None` disables the refresh worker.
    pub refresh_interval: Option<Duration>,
}

impl ServerConfig {
    /// Reads `JOBRADAR_PORT`, `JOBRADAR_FILTER_CONFIG` and
    /// `JOBRADAR_REFRESH_INTERVAL_SECS` (`0` disables refreshing).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("JOBRADAR_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid JOBRADAR_PORT '{raw}'"))
            })?,
        };

        let refresh_secs = match lookup("JOBRADAR_REFRESH_INTERVAL_SECS") {
            None => DEFAULT_REFRESH_SECS,
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid JOBRADAR_REFRESH_INTERVAL_SECS '{raw}': must be a whole number of seconds"
                ))
            })?,
        };

        Ok(Self {
            port,
            filter_config: lookup("JOBRADAR_FILTER_CONFIG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        })
    }

    /// The configured filter profile, or the built-in default.
    pub fn load_filter(&self) -> Result<FilterConfig, AppError> {
        match &self.filter_config {
            Some(path) => FilterConfig::from_file(path),
            None => Ok(FilterConfig::default()),
        }
    }
}
