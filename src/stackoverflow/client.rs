//! HTTP client for the Stack Exchange API
//!
//! This module handles:
//! - Building HTTP clients with the configured user agent and TLS trust
//! - Resolving endpoint paths against the configured base URL
//! - Issuing GET requests with a per-request timeout
//! - Classifying transport, status and decode failures

use super::ApiError;
use crate::config::ApiConfig;
use crate::{ConfigError, ConfigResult};
use reqwest::{Certificate, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Upper bound on the connect phase of a request
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest slice of an error response body kept in error messages
const MAX_DETAIL_CHARS: usize = 200;

/// Builds an HTTP client with the configured trust settings
///
/// The request timeout is deliberately not set here; every request carries
/// its own.
///
/// # Arguments
///
/// * `config` - The API configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ConfigError)` - The CA bundle could not be read or the client failed to build
///
/// # Example
///
/// ```no_run
/// use error_scout::config::ApiConfig;
/// use error_scout::stackoverflow::build_http_client;
///
/// let client = build_http_client(&ApiConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ApiConfig) -> ConfigResult<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(CONNECT_TIMEOUT.min(config.timeout()))
        .gzip(true);

    if let Some(path) = &config.ca_bundle {
        tracing::debug!("Trusting extra CA bundle at {}", path.display());
        let pem = std::fs::read(path)?;
        builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
    }

    if !config.trust_env {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

/// Client for the Stack Exchange API endpoints used by Error Scout
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    pub(crate) site: String,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client from configuration, building a fresh HTTP client
    pub fn new(config: &ApiConfig) -> ConfigResult<Self> {
        let client = build_http_client(config)?;
        Self::with_client(client, config)
    }

    /// Creates a client around an existing HTTP client
    pub fn with_client(client: Client, config: &ApiConfig) -> ConfigResult<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            site: config.site.clone(),
            timeout: config.timeout(),
        })
    }

    /// Resolves an endpoint path such as `search/advanced`
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::Endpoint {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Sends a GET request and decodes the JSON response
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!("Making request to {}", url);

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Error payload the API returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error_name: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Summarizes an error response body for display
fn error_detail(body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        match (payload.error_name, payload.error_message) {
            (Some(name), Some(message)) => return format!("{}: {}", name, message),
            (None, Some(message)) => return message,
            (Some(name), None) => return name,
            (None, None) => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if trimmed.chars().count() > MAX_DETAIL_CHARS {
        format!(
            "{}...",
            trimmed.chars().take(MAX_DETAIL_CHARS).collect::<String>()
        )
    } else {
        trimmed.to_string()
    }
}
