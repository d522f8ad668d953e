use crate::config::types::{ApiConfig, Config, SearchConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Largest result limit accepted; the API's page size is twice the limit
const MAX_RESULT_LIMIT: usize = 10;

/// Longest per-request timeout accepted, in seconds
const MAX_TIMEOUT_SECS: u64 = 120;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_api_config(&config.api)?;
    validate_search_config(&config.search)?;
    Ok(())
}

/// Validates API connection settings
fn validate_api_config(config: &ApiConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.site.is_empty() {
        return Err(ConfigError::Validation("site cannot be empty".to_string()));
    }

    if !config
        .site
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "site must contain only alphanumeric characters, dots and hyphens, got '{}'",
            config.site
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates search settings
fn validate_search_config(config: &SearchConfig) -> ConfigResult<()> {
    validate_result_limit(config.limit)
}

/// Validates a result limit, whether configured or given on the command line
pub fn validate_result_limit(limit: usize) -> ConfigResult<()> {
    if limit < 1 || limit > MAX_RESULT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_RESULT_LIMIT, limit
        )));
    }

    Ok(())
}
