//! Error Scout: error normalization and Stack Overflow answer lookup
//!
//! This crate turns a raw error message or stack trace into a cleaned,
//! signature-bearing normalized form, and searches the Stack Exchange API for
//! a small, ranked set of questions with their best answers attached.

pub mod config;
pub mod normalize;
pub mod output;
pub mod stackoverflow;
pub mod tools;

use thiserror::Error;

/// Main error type for Error Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for Error Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use normalize::{normalize, Language, NormalizedError};
pub use stackoverflow::{build_short_explanation, AggregatedResult, Aggregator, ApiClient, SearchHit};
