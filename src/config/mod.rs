//! Configuration module for Error Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults that
//! target the public Stack Exchange API.
//!
//! # Example
//!
//! ```no_run
//! use error_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("error-scout.toml")).unwrap();
//! println!("Results per search: {}", config.search.limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, SearchConfig, DEFAULT_API_BASE_URL, DEFAULT_RESULT_LIMIT, DEFAULT_SITE,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::{validate, validate_result_limit};
