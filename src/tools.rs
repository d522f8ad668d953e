//! Tool contracts exposed to the tool-hosting layer
//!
//! Two operations are exposed with camelCase JSON payloads:
//! - `normalize_error`: `{rawError}` -> `{normalizedError, errorSignature, detectedLanguage}`
//! - `search_stackoverflow`: `{fullError, language?}` -> [`AggregatedResult`]

use crate::normalize::normalize;
use crate::stackoverflow::{AggregatedResult, Aggregator};
use serde::{Deserialize, Serialize};

/// Tool name for error normalization
pub const NORMALIZE_ERROR: &str = "normalize_error";

/// Tool name for the Stack Overflow search
pub const SEARCH_STACKOVERFLOW: &str = "search_stackoverflow";

/// Input of the `normalize_error` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeErrorInput {
    #[serde(default)]
    pub raw_error: String,
}

/// Output of the `normalize_error` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeErrorOutput {
    pub normalized_error: String,
    pub error_signature: Option<String>,
    pub detected_language: Option<String>,
}

/// Input of the `search_stackoverflow` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStackOverflowInput {
    #[serde(default)]
    pub full_error: String,

    /// Tag filter such as `python`; blank values are ignored
    #[serde(default)]
    pub language: Option<String>,
}

impl SearchStackOverflowInput {
    /// Returns the language tag, if a non-blank one was given
    pub fn language_tag(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|language| !language.is_empty())
    }
}

/// Runs the `normalize_error` tool
pub fn normalize_error(input: NormalizeErrorInput) -> NormalizeErrorOutput {
    tracing::info!(
        "Tool called: {} ({} characters)",
        NORMALIZE_ERROR,
        input.raw_error.len()
    );

    let normalized = normalize(&input.raw_error);

    NormalizeErrorOutput {
        normalized_error: normalized.text,
        error_signature: normalized.signature,
        detected_language: normalized.language.map(|language| language.as_str().to_string()),
    }
}

/// Runs the `search_stackoverflow` tool
///
/// Always returns a well-formed result; search failures are reported in
/// `apiError`.
pub async fn search_stackoverflow(
    aggregator: &Aggregator,
    input: SearchStackOverflowInput,
) -> AggregatedResult {
    tracing::info!(
        "Tool called: {} ({} characters, language: {:?})",
        SEARCH_STACKOVERFLOW,
        input.full_error.len(),
        input.language_tag()
    );

    aggregator
        .aggregate(&input.full_error, input.language_tag())
        .await
}
