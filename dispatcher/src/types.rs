//! Dispatcher-specific types

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use shared::{RecipientId, RequestStatus};
use crate::error::{DispatcherError, DispatcherResult};

/// Base URL of the blood bank API
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5050";

/// Static file loaded when the API cannot be reached
pub const DEFAULT_FALLBACK_CSV: &str = "data/bloodbanks_data.csv";

/// Delay before a sent request's simulated reply lands
pub const DEFAULT_RESOLUTION_DELAY: Duration = Duration::from_secs(3);

pub const ENV_API_BASE: &str = "BLOODBANK_API_BASE";
pub const ENV_FALLBACK_CSV: &str = "BLOODBANK_FALLBACK_CSV";
pub const ENV_RESOLUTION_DELAY_MS: &str = "BLOODBANK_RESOLUTION_DELAY_MS";

/// Runtime configuration for a dispatcher session
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    pub api_base_url: String,
    pub fallback_csv_path: PathBuf,
    pub resolution_delay: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fallback_csv_path: PathBuf::from(DEFAULT_FALLBACK_CSV),
            resolution_delay: DEFAULT_RESOLUTION_DELAY,
        }
    }
}

impl DispatcherConfig {
    /// Defaults overridden by whatever is set in the environment
    pub fn from_env() -> DispatcherResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> DispatcherResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_API_BASE) {
            config.api_base_url = base;
        }
        if let Some(path) = lookup(ENV_FALLBACK_CSV) {
            config.fallback_csv_path = PathBuf::from(path);
        }
        if let Some(delay) = lookup(ENV_RESOLUTION_DELAY_MS) {
            let millis = delay.trim().parse::<u64>().map_err(|e| {
                DispatcherError::config(format!("{ENV_RESOLUTION_DELAY_MS}={delay}: {e}"))
            })?;
            config.resolution_delay = Duration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the base URL is an absolute http(s) URL
    pub fn validate(&self) -> DispatcherResult<()> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| DispatcherError::config(format!("invalid API base URL '{}': {e}", self.api_base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DispatcherError::config(format!(
                "API base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// Absolute URL of an API path such as `/api/bloodbanks`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Which source populated the recipient store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSource {
    Primary,
    Fallback,
}

/// Result of a recipient store load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub source: LoadSource,
    pub recipients: usize,
    /// Why the primary source was abandoned, if it was
    pub warning: Option<String>,
}

/// Published whenever a recipient's status changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub recipient: RecipientId,
    pub status: RequestStatus,
    pub at: DateTime<Utc>,
}

impl StatusChange {
    pub fn now(recipient: RecipientId, status: RequestStatus) -> Self {
        Self {
            recipient,
            status,
            at: Utc::now(),
        }
    }
}
