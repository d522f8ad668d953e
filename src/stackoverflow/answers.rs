//! Best-effort answer body fetching
//!
//! Both fetch strategies issue a single request and never fail: every problem
//! becomes an [`EnrichmentMiss`], which is logged and handed back so callers
//! can inspect it without reading log output.

use super::client::ApiClient;
use super::types::{AnswerBody, AnswerItem, Envelope};
use super::ApiError;
use thiserror::Error;

/// Reason an answer fetch produced no usable body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentMiss {
    #[error("response contained no answers")]
    NoItems,

    #[error("answer has no body")]
    EmptyBody,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("undecodable response: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl From<ApiError> for EnrichmentMiss {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, .. } => Self::Status(status),
            ApiError::Transport { source, .. } => Self::Transport(source.to_string()),
            ApiError::Decode { message, .. } => Self::Decode(message),
            ApiError::Endpoint { message, .. } => Self::Endpoint(message),
        }
    }
}

/// Outcome of an answer fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerLookup {
    Found(AnswerBody),
    Missed(EnrichmentMiss),
}

impl AnswerLookup {
    /// Returns the answer, if one was found
    pub fn into_answer(self) -> Option<AnswerBody> {
        match self {
            Self::Found(answer) => Some(answer),
            Self::Missed(_) => None,
        }
    }

    /// Returns the miss reason, if no answer was found
    pub fn miss(&self) -> Option<&EnrichmentMiss> {
        match self {
            Self::Found(_) => None,
            Self::Missed(reason) => Some(reason),
        }
    }

    fn from_items(items: Vec<AnswerItem>) -> Self {
        match items.into_iter().next() {
            Some(item) => AnswerBody::from_item(item)
                .map_or(Self::Missed(EnrichmentMiss::EmptyBody), Self::Found),
            None => Self::Missed(EnrichmentMiss::NoItems),
        }
    }
}

impl ApiClient {
    /// Fetches an answer by id, typically a question's accepted answer
    pub async fn fetch_accepted(&self, answer_id: u64) -> AnswerLookup {
        tracing::info!("Fetching answer content for answer_id={}", answer_id);
        let path = format!("answers/{}", answer_id);
        self.fetch_answer(&path, "activity").await
    }

    /// Fetches the highest-voted answer of a question
    pub async fn fetch_first(&self, question_id: u64) -> AnswerLookup {
        tracing::info!("Fetching first answer for question_id={}", question_id);
        let path = format!("questions/{}/answers", question_id);
        self.fetch_answer(&path, "votes").await
    }

    async fn fetch_answer(&self, path: &str, sort: &str) -> AnswerLookup {
        let lookup = match self.request_answers(path, sort).await {
            Ok(envelope) => {
                envelope.log_quota();
                AnswerLookup::from_items(envelope.into_items())
            }
            Err(error) => {
                tracing::error!("Error fetching {}: {}", path, error);
                AnswerLookup::Missed(error.into())
            }
        };

        match &lookup {
            AnswerLookup::Found(answer) => tracing::info!(
                "Fetched answer from {} ({} chars)",
                path,
                answer.body.len()
            ),
            AnswerLookup::Missed(reason) => {
                tracing::warn!("No answer from {}: {}", path, reason)
            }
        }

        lookup
    }

    async fn request_answers(
        &self,
        path: &str,
        sort: &str,
    ) -> Result<Envelope<AnswerItem>, ApiError> {
        let url = self.endpoint(path)?;
        let params = [
            ("order", "desc".to_string()),
            ("sort", sort.to_string()),
            ("site", self.site.clone()),
            ("filter", "withbody".to_string()),
        ];
        self.get_json(url, &params).await
    }
}
