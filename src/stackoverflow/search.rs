//! Question search and ranking.

use super::client::ApiClient;
use super::types::{Envelope, QuestionItem, SearchHit};
use super::ApiError;

const SEARCH_PATH: &str = "search/advanced";

/// Number of questions requested for a given result limit
///
/// Twice the limit, so enough questions with accepted answers can be
/// promoted ahead of the truncation.
pub fn page_size(limit: usize) -> usize {
    limit.saturating_mul(2).max(limit)
}

/// Orders questions with an accepted answer first, then truncates to `limit`
///
/// Each group keeps the API's relevance order.
///
/// # Examples
///
/// ```
/// use error_scout::stackoverflow::{rank_questions, QuestionItem};
///
/// let item = |id: u64, accepted: Option<u64>| QuestionItem {
///     question_id: Some(id),
///     accepted_answer_id: accepted,
///     ..Default::default()
/// };
///
/// let ranked = rank_questions(vec![item(1, None), item(2, Some(20)), item(3, None)], 3);
/// let ids: Vec<_> = ranked.iter().filter_map(|q| q.question_id).collect();
/// assert_eq!(ids, vec![2, 1, 3]);
/// ```
pub fn rank_questions(items: Vec<QuestionItem>, limit: usize) -> Vec<QuestionItem> {
    let (with_accepted, without_accepted): (Vec<_>, Vec<_>) = items
        .into_iter()
        .partition(|item| item.accepted_answer().is_some());

    tracing::info!(
        "Ranking results - {} with accepted answers, {} without",
        with_accepted.len(),
        without_accepted.len()
    );

    with_accepted
        .into_iter()
        .chain(without_accepted)
        .take(limit)
        .collect()
}

impl ApiClient {
    /// Searches for questions matching an error message
    ///
    /// Issues a single request to `/search/advanced` sorted by relevance and
    /// returns at most `limit` un-enriched hits, questions with an accepted
    /// answer first.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text query, usually the full error message
    /// * `limit` - Maximum number of hits returned
    /// * `tag` - Optional tag filter such as `python`; blank tags are ignored
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SearchHit>)` - Ranked hits, possibly empty
    /// * `Err(ApiError)` - Transport failure, non-2xx status or undecodable body
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        tag: Option<&str>,
    ) -> Result<Vec<SearchHit>, ApiError> {
        let url = self.endpoint(SEARCH_PATH)?;

        let mut params = vec![
            ("order", "desc".to_string()),
            ("sort", "relevance".to_string()),
            ("site", self.site.clone()),
            ("q", query.to_string()),
            ("pagesize", page_size(limit).to_string()),
        ];

        if let Some(tag) = tag.map(str::trim).filter(|tag| !tag.is_empty()) {
            tracing::info!("Adding language tag: {}", tag);
            params.push(("tagged", tag.to_string()));
        }

        tracing::info!("Searching Stack Overflow for: {}", preview(query));

        let envelope: Envelope<QuestionItem> = self.get_json(url, &params).await?;
        envelope.log_quota();

        let items = envelope.into_items();
        tracing::info!("Found {} items in search results", items.len());

        Ok(rank_questions(items, limit)
            .into_iter()
            .map(SearchHit::from_question)
            .collect())
    }
}

/// Shortens a query for log output
fn preview(query: &str) -> String {
    const MAX_CHARS: usize = 100;
    if query.chars().count() > MAX_CHARS {
        format!("{}...", query.chars().take(MAX_CHARS).collect::<String>())
    } else {
        query.to_string()
    }
}
