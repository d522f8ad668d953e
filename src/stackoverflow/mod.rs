//! Stack Overflow question/answer aggregation
//!
//! This module contains the network side of Error Scout:
//! - Building the HTTP client (timeouts, TLS trust, proxies)
//! - Searching questions and ranking them by acceptance status
//! - Fetching answer bodies as best-effort enrichment
//! - Assembling the final, always well-formed aggregated result
//!
//! Only a failed search is visible to callers, and then only through
//! [`AggregatedResult::api_error`]. Answer fetch failures degrade to a hit
//! without answer text.

mod aggregate;
mod answers;
mod client;
mod search;
mod types;

pub use aggregate::{aggregate, build_short_explanation, Aggregator, NO_ERROR_TEXT};
pub use answers::{AnswerLookup, EnrichmentMiss};
pub use client::{build_http_client, ApiClient};
pub use search::{page_size, rank_questions};
pub use types::{
    AggregatedResult, AnswerBody, AnswerItem, Envelope, QuestionItem, SearchHit,
};

use thiserror::Error;

/// Public site that question and answer links point at
pub const STACKOVERFLOW_URL: &str = "https://stackoverflow.com";

/// Link to a specific answer
pub fn answer_url(answer_id: u64) -> String {
    format!("{}/a/{}", STACKOVERFLOW_URL, answer_id)
}

/// Link to a question page
pub fn question_url(question_id: u64) -> String {
    format!("{}/questions/{}", STACKOVERFLOW_URL, question_id)
}

/// Errors raised by calls to the Stack Exchange API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}: {detail}")]
    Status {
        url: String,
        status: u16,
        detail: String,
    },

    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid endpoint '{path}': {message}")]
    Endpoint { path: String, message: String },
}

impl ApiError {
    /// Returns the upstream HTTP status, if the API answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
