//! Search orchestration and result assembly.

use super::answer_url;
use super::answers::AnswerLookup;
use super::client::ApiClient;
use super::types::{AggregatedResult, SearchHit};
use crate::config::SearchConfig;
use crate::normalize::split_lines;
use futures::future::join_all;

/// Explanation used when no error text was given
pub const NO_ERROR_TEXT: &str = "No error text was provided.";

/// First lines longer than this are truncated in the explanation
const MAX_EXPLANATION_CHARS: usize = 220;

/// Characters kept from a truncated first line, before the ellipsis
const TRUNCATED_CHARS: usize = 217;

/// Builds the one-sentence explanation attached to every result
///
/// # Examples
///
/// ```
/// use error_scout::build_short_explanation;
///
/// assert_eq!(build_short_explanation(""), "No error text was provided.");
/// assert_eq!(
///     build_short_explanation("KeyError: 'id'\n  more"),
///     "A search was performed on Stack Overflow using this error: \"KeyError: 'id'\"."
/// );
/// ```
pub fn build_short_explanation(full_error: &str) -> String {
    let Some(first_line) = split_lines(full_error.trim())
        .first()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
    else {
        return NO_ERROR_TEXT.to_string();
    };

    let line = if first_line.chars().count() > MAX_EXPLANATION_CHARS {
        let kept: String = first_line.chars().take(TRUNCATED_CHARS).collect();
        format!("{}...", kept.trim_end())
    } else {
        first_line.to_string()
    };

    format!(
        "A search was performed on Stack Overflow using this error: \"{}\".",
        line
    )
}

/// Searches Stack Overflow and attaches answer bodies to the ranked hits
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: ApiClient,
    limit: usize,
    concurrent_fetches: bool,
}

impl Aggregator {
    /// Creates an aggregator using the given search settings
    pub fn new(client: ApiClient, config: &SearchConfig) -> Self {
        Self {
            client,
            limit: config.limit,
            concurrent_fetches: config.concurrent_answer_fetches,
        }
    }

    /// Overrides the number of results returned
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Enables or disables concurrent answer fetches
    pub fn with_concurrent_fetches(mut self, concurrent: bool) -> Self {
        self.concurrent_fetches = concurrent;
        self
    }

    /// Runs a search and enriches every retained hit with an answer body
    ///
    /// # Steps
    ///
    /// 1. Search, ranking questions with accepted answers first
    /// 2. For each hit, fetch the accepted answer (linking to it) or the
    ///    question's highest-voted answer
    /// 3. Attach whatever answer was found
    ///
    /// Never fails. A failed search yields empty results and `api_error`; a
    /// failed answer fetch leaves that hit without answer text. Results keep
    /// the ranked order even when fetched concurrently.
    pub async fn aggregate(&self, full_error: &str, language: Option<&str>) -> AggregatedResult {
        tracing::info!(
            "Aggregating answers for error of {} characters (language: {:?})",
            full_error.len(),
            language
        );

        let short_explanation = build_short_explanation(full_error);

        let hits = match self.client.search(full_error, self.limit, language).await {
            Ok(hits) => hits,
            Err(error) => {
                tracing::error!("Stack Overflow search failed: {}", error);
                return AggregatedResult {
                    error_message: full_error.to_string(),
                    short_explanation,
                    results: Vec::new(),
                    api_error: Some(format!("Failed to query Stack Overflow API: {}", error)),
                };
            }
        };

        let total = hits.len();
        let results = if self.concurrent_fetches {
            join_all(
                hits.into_iter()
                    .enumerate()
                    .map(|(idx, hit)| self.enrich(idx + 1, total, hit)),
            )
            .await
        } else {
            let mut results = Vec::with_capacity(total);
            for (idx, hit) in hits.into_iter().enumerate() {
                results.push(self.enrich(idx + 1, total, hit).await);
            }
            results
        };

        tracing::info!("Returning {} results", results.len());

        AggregatedResult {
            error_message: full_error.to_string(),
            short_explanation,
            results,
            api_error: None,
        }
    }

    /// Attaches the best available answer to a hit
    async fn enrich(&self, position: usize, total: usize, mut hit: SearchHit) -> SearchHit {
        tracing::debug!(
            "Processing result {} of {} (question_id: {:?}, accepted: {})",
            position,
            total,
            hit.question_id,
            hit.has_accepted_answer
        );

        let lookup = if let Some(answer_id) = hit.accepted_answer_id {
            hit.link = answer_url(answer_id);
            Some(self.client.fetch_accepted(answer_id).await)
        } else if let Some(question_id) = hit.question_id {
            Some(self.client.fetch_first(question_id).await)
        } else {
            None
        };

        let answer = lookup.and_then(AnswerLookup::into_answer);
        hit.answer_is_accepted = answer.as_ref().is_some_and(|answer| answer.is_accepted);
        hit.answer_text = answer.map(|answer| answer.body);
        hit
    }
}

/// Runs a sequential aggregation with an explicit limit
///
/// Shorthand for [`Aggregator::aggregate`] with default search settings.
pub async fn aggregate(
    client: &ApiClient,
    full_error: &str,
    limit: usize,
    language: Option<&str>,
) -> AggregatedResult {
    Aggregator::new(client.clone(), &SearchConfig::default())
        .with_limit(limit)
        .aggregate(full_error, language)
        .await
}
