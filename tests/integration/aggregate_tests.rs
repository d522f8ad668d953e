//! Search, ranking and answer enrichment against a mock API

use crate::common::{aggregator, answer, client, envelope, question};
use error_scout::stackoverflow::{aggregate, AnswerLookup, EnrichmentMiss};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an answers-by-id response
async fn mount_accepted(server: &MockServer, answer_id: u64, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/answers/{}", answer_id)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![answer(answer_id, body, true)])),
        )
        .mount(server)
        .await;
}

/// Mounts a question's-answers response
async fn mount_first(server: &MockServer, question_id: u64, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/questions/{}/answers", question_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![answer(
            question_id * 100,
            body,
            false,
        )])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_accepted_answers_ranked_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .and(query_param("order", "desc"))
        .and(query_param("sort", "relevance"))
        .and(query_param("site", "stackoverflow"))
        .and(query_param("q", "ValueError: bad value"))
        .and(query_param("pagesize", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![
            question(1, None),
            question(2, Some(20)),
            question(3, None),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_accepted(&mock_server, 20, "<p>accepted for 2</p>").await;
    mount_first(&mock_server, 1, "<p>top for 1</p>").await;
    mount_first(&mock_server, 3, "<p>top for 3</p>").await;

    let result = aggregator(&mock_server, false)
        .aggregate("ValueError: bad value", None)
        .await;

    assert_eq!(result.api_error, None);
    let ids: Vec<_> = result.results.iter().filter_map(|hit| hit.question_id).collect();
    assert_eq!(ids, vec![2, 1, 3]);

    let first = &result.results[0];
    assert!(first.has_accepted_answer);
    assert_eq!(first.link, "https://stackoverflow.com/a/20");
    assert_eq!(first.answer_text.as_deref(), Some("<p>accepted for 2</p>"));
    assert!(first.answer_is_accepted);
    assert_eq!(first.creation_date.as_deref(), Some("2021-01-01T00:00:00+00:00"));

    let second = &result.results[1];
    assert!(!second.has_accepted_answer);
    assert_eq!(
        second.link,
        "https://stackoverflow.com/questions/1/question-1"
    );
    assert_eq!(second.answer_text.as_deref(), Some("<p>top for 1</p>"));
    assert!(!second.answer_is_accepted);

    assert_eq!(result.results[2].answer_text.as_deref(), Some("<p>top for 3</p>"));
    assert_eq!(
        result.short_explanation,
        "A search was performed on Stack Overflow using this error: \"ValueError: bad value\"."
    );
}

#[tokio::test]
async fn test_results_truncated_to_limit() {
    let mock_server = MockServer::start().await;

    let items = (1..=6).map(|id| question(id, None)).collect();
    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(items)))
        .mount(&mock_server)
        .await;

    for id in 1..=3 {
        mount_first(&mock_server, id, "<p>answer</p>").await;
    }

    // Questions past the limit must never be enriched
    for id in 4..=6 {
        Mock::given(method("GET"))
            .and(path(format!("/questions/{}/answers", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let result = aggregator(&mock_server, false)
        .aggregate("KeyError: 'id'", None)
        .await;

    assert_eq!(result.results.len(), 3);
}

#[tokio::test]
async fn test_search_server_error_degrades_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server, false)
        .aggregate("TypeError: x is not a function", None)
        .await;

    assert!(result.results.is_empty());
    assert!(result.is_degraded());
    let api_error = result.api_error.expect("api_error should be set");
    assert!(api_error.starts_with("Failed to query Stack Overflow API:"));
    assert!(api_error.contains("500"));
    assert!(api_error.contains("upstream exploded"));
    assert_eq!(result.error_message, "TypeError: x is not a function");
}

#[tokio::test]
async fn test_search_api_error_payload_in_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error_id": 502,
            "error_name": "throttle_violation",
            "error_message": "too many requests from this IP",
        })))
        .mount(&mock_server)
        .await;

    let result = aggregate(&client(&mock_server), "NameError: x", 3, None).await;

    let api_error = result.api_error.expect("api_error should be set");
    assert!(api_error.contains("throttle_violation: too many requests from this IP"));
}

#[tokio::test]
async fn test_undecodable_search_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let result = aggregate(&client(&mock_server), "NameError: x", 3, None).await;

    assert!(result.results.is_empty());
    assert!(result
        .api_error
        .expect("api_error should be set")
        .contains("invalid response"));
}

#[tokio::test]
async fn test_search_timeout_degrades_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![]))
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&mock_server)
        .await;

    let result = aggregate(&client(&mock_server), "NameError: x", 3, None).await;

    assert!(result.results.is_empty());
    assert!(result.api_error.is_some());
}

#[tokio::test]
async fn test_missing_items_key_yields_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"quota_remaining": 10})),
        )
        .mount(&mock_server)
        .await;

    let result = aggregate(&client(&mock_server), "NameError: x", 3, None).await;

    assert!(result.results.is_empty());
    assert_eq!(result.api_error, None);
}

#[tokio::test]
async fn test_answer_with_zero_items_leaves_hit_without_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![
            question(1, Some(10)),
            question(2, None),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/answers/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .mount(&mock_server)
        .await;

    mount_first(&mock_server, 2, "<p>still here</p>").await;

    let result = aggregator(&mock_server, false)
        .aggregate("IndexError: list index out of range", None)
        .await;

    assert_eq!(result.api_error, None);
    assert_eq!(result.results.len(), 2);

    let missed = &result.results[0];
    assert_eq!(missed.answer_text, None);
    assert!(!missed.answer_is_accepted);
    assert!(missed.has_accepted_answer);
    assert_eq!(missed.link, "https://stackoverflow.com/a/10");

    assert_eq!(
        result.results[1].answer_text.as_deref(),
        Some("<p>still here</p>")
    );
}

#[tokio::test]
async fn test_failed_answer_fetch_does_not_abort_aggregation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![
            question(1, None),
            question(2, None),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/questions/1/answers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    mount_first(&mock_server, 2, "<p>fine</p>").await;

    let result = aggregator(&mock_server, false)
        .aggregate("OSError: disk full", None)
        .await;

    assert_eq!(result.api_error, None);
    assert_eq!(result.results[0].answer_text, None);
    assert_eq!(result.results[1].answer_text.as_deref(), Some("<p>fine</p>"));
}

#[tokio::test]
async fn test_language_tag_sent_when_given() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .and(query_param("tagged", "python"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = aggregator(&mock_server, false)
        .aggregate("ImportError: cannot import name 'x'", Some("python"))
        .await;

    assert_eq!(result.api_error, None);
}

#[tokio::test]
async fn test_language_tag_omitted_when_absent_or_blank() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let aggregator = aggregator(&mock_server, false);
    aggregator.aggregate("KeyError: 'a'", None).await;
    aggregator.aggregate("KeyError: 'a'", Some("   ")).await;

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording is enabled");
    for request in requests {
        assert!(request.url.query_pairs().all(|(key, _)| key != "tagged"));
    }
}

#[tokio::test]
async fn test_concurrent_fetches_keep_ranked_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![
            question(1, None),
            question(2, Some(20)),
            question(3, None),
        ])))
        .mount(&mock_server)
        .await;

    // The first ranked hit answers slowest
    Mock::given(method("GET"))
        .and(path("/answers/20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![answer(20, "<p>slow</p>", true)]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    mount_first(&mock_server, 1, "<p>fast 1</p>").await;
    mount_first(&mock_server, 3, "<p>fast 3</p>").await;

    let result = aggregator(&mock_server, true)
        .aggregate("RuntimeError: boom", None)
        .await;

    let answers: Vec<_> = result
        .results
        .iter()
        .map(|hit| hit.answer_text.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(answers, vec!["<p>slow</p>", "<p>fast 1</p>", "<p>fast 3</p>"]);
}

#[tokio::test]
async fn test_fetch_accepted_request_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/answers/77"))
        .and(query_param("order", "desc"))
        .and(query_param("sort", "activity"))
        .and(query_param("site", "stackoverflow"))
        .and(query_param("filter", "withbody"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![answer(77, "<p>yes</p>", true)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = client(&mock_server).fetch_accepted(77).await;

    let answer = lookup.into_answer().expect("answer should be found");
    assert_eq!(answer.answer_id, Some(77));
    assert_eq!(answer.body, "<p>yes</p>");
    assert!(answer.is_accepted);
}

#[tokio::test]
async fn test_fetch_first_request_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/questions/5/answers"))
        .and(query_param("order", "desc"))
        .and(query_param("sort", "votes"))
        .and(query_param("filter", "withbody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![
            answer(501, "<p>most votes</p>", false),
            answer(502, "<p>fewer votes</p>", true),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = client(&mock_server).fetch_first(5).await;

    assert_eq!(
        lookup.into_answer().map(|answer| answer.body).as_deref(),
        Some("<p>most votes</p>")
    );
}

#[tokio::test]
async fn test_fetch_miss_reasons() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/answers/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/answers/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(vec![])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/answers/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("garbage"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);

    assert_eq!(
        client.fetch_accepted(1).await,
        AnswerLookup::Missed(EnrichmentMiss::Status(404))
    );
    assert_eq!(
        client.fetch_accepted(2).await,
        AnswerLookup::Missed(EnrichmentMiss::NoItems)
    );
    assert!(matches!(
        client.fetch_accepted(3).await,
        AnswerLookup::Missed(EnrichmentMiss::Decode(_))
    ));
}
