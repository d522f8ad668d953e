use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the public Stack Exchange API
pub const DEFAULT_API_BASE_URL: &str = "https://api.stackexchange.com/2.3";

/// Stack Exchange site queried by default
pub const DEFAULT_SITE: &str = "stackoverflow";

/// Per-request timeout applied to every API call
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Number of ranked results returned by a search
pub const DEFAULT_RESULT_LIMIT: usize = 3;

/// Main configuration structure for Error Scout
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Stack Exchange API connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API (e.g., "https://api.stackexchange.com/2.3")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Site parameter sent with every request
    pub site: String,

    /// Timeout for each individual request, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Extra PEM root certificate to trust (corporate proxies and the like)
    #[serde(rename = "ca-bundle", skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<PathBuf>,

    /// Whether proxy settings from the environment are honoured
    #[serde(rename = "trust-env")]
    pub trust_env: bool,
}

impl ApiConfig {
    /// Returns the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            site: DEFAULT_SITE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("error-scout/{}", env!("CARGO_PKG_VERSION")),
            ca_bundle: None,
            trust_env: false,
        }
    }
}

/// Search and aggregation behavior
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of ranked results returned
    pub limit: usize,

    /// Fetch answer bodies for all retained hits at once instead of one by one
    #[serde(rename = "concurrent-answer-fetches")]
    pub concurrent_answer_fetches: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
            concurrent_answer_fetches: false,
        }
    }
}
