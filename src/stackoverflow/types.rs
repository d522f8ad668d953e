//! Wire types for the Stack Exchange API and the values built from them
//!
//! Every server-controlled key is optional; nothing here assumes a field is
//! present.

use super::question_url;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common response wrapper returned by every Stack Exchange endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub items: Option<Vec<T>>,

    pub has_more: Option<bool>,

    pub quota_remaining: Option<u64>,

    /// Seconds the API asks clients to wait before the next request
    pub backoff: Option<u64>,
}

impl<T> Envelope<T> {
    /// Consumes the envelope, returning its items (empty if absent)
    pub fn into_items(self) -> Vec<T> {
        self.items.unwrap_or_default()
    }

    /// Logs quota and backoff information
    pub fn log_quota(&self) {
        if let Some(remaining) = self.quota_remaining {
            tracing::debug!("API quota remaining: {}", remaining);
        }
        if let Some(backoff) = self.backoff {
            tracing::warn!("API requested a backoff of {}s", backoff);
        }
    }
}

/// A question item from `/search/advanced`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuestionItem {
    #[serde(default)]
    pub question_id: Option<u64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub score: Option<i64>,

    /// Unix timestamp, seconds
    #[serde(default)]
    pub creation_date: Option<i64>,

    #[serde(default)]
    pub accepted_answer_id: Option<u64>,
}

impl QuestionItem {
    /// Returns the accepted answer id, treating 0 as absent
    pub fn accepted_answer(&self) -> Option<u64> {
        self.accepted_answer_id.filter(|id| *id != 0)
    }
}

/// An answer item from `/answers/{id}` or `/questions/{id}/answers`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnswerItem {
    #[serde(default)]
    pub answer_id: Option<u64>,

    /// HTML body, present when requested with `filter=withbody`
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub is_accepted: Option<bool>,

    #[serde(default)]
    pub score: Option<i64>,
}

/// A fetched answer with a non-empty body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBody {
    pub answer_id: Option<u64>,
    /// HTML body as returned by the API
    pub body: String,
    pub is_accepted: bool,
    pub score: i64,
}

impl AnswerBody {
    /// Builds an answer body from an API item; None if the body is missing or empty
    pub fn from_item(item: AnswerItem) -> Option<Self> {
        let body = item.body.filter(|body| !body.trim().is_empty())?;
        Some(Self {
            answer_id: item.answer_id,
            body,
            is_accepted: item.is_accepted.unwrap_or(false),
            score: item.score.unwrap_or(0),
        })
    }
}

/// One ranked search result, optionally enriched with an answer body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub title: String,
    pub has_accepted_answer: bool,
    pub link: String,
    pub score: i64,
    /// RFC 3339 creation time of the question
    pub creation_date: Option<String>,
    /// HTML body of the accepted or highest-voted answer
    pub answer_text: Option<String>,
    pub answer_is_accepted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<u64>,

    #[serde(skip)]
    pub accepted_answer_id: Option<u64>,
}

impl SearchHit {
    /// Builds an un-enriched hit from a question item
    ///
    /// The link is the question's own link, falling back to a constructed
    /// question URL, or empty if neither is known.
    pub fn from_question(item: QuestionItem) -> Self {
        let accepted_answer_id = item.accepted_answer();
        let link = item
            .link
            .clone()
            .filter(|link| !link.is_empty())
            .or_else(|| item.question_id.map(question_url))
            .unwrap_or_default();

        Self {
            title: item.title.unwrap_or_default(),
            has_accepted_answer: accepted_answer_id.is_some(),
            link,
            score: item.score.unwrap_or(0),
            creation_date: item.creation_date.and_then(format_timestamp),
            answer_text: None,
            answer_is_accepted: false,
            question_id: item.question_id,
            accepted_answer_id,
        }
    }
}

/// Converts a unix timestamp into an RFC 3339 UTC string
fn format_timestamp(seconds: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|dt| dt.to_rfc3339())
}

/// Final response of an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub error_message: String,
    pub short_explanation: String,
    pub results: Vec<SearchHit>,

    /// Present only when the search itself failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_error: Option<String>,
}

impl AggregatedResult {
    /// Returns true if the search failed and results are necessarily empty
    pub fn is_degraded(&self) -> bool {
        self.api_error.is_some()
    }
}
