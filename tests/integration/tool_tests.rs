//! Tool contract payloads end-to-end

use crate::common::{aggregator, answer, envelope, question};
use error_scout::tools::{self, NormalizeErrorInput, SearchStackOverflowInput};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_stackoverflow_payload_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .and(query_param("tagged", "java"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(vec![question(9, Some(90))])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/answers/90"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(vec![answer(90, "<p>check for null</p>", true)])),
        )
        .mount(&mock_server)
        .await;

    let input: SearchStackOverflowInput = serde_json::from_value(json!({
        "fullError": "Exception in thread \"main\" java.lang.NullPointerException\n\tat App.main(App.java:3)",
        "language": "java",
    }))
    .unwrap();

    let result = tools::search_stackoverflow(&aggregator(&mock_server, false), input).await;
    let payload = serde_json::to_value(&result).unwrap();

    assert_eq!(
        payload["shortExplanation"],
        "A search was performed on Stack Overflow using this error: \"Exception in thread \"main\" java.lang.NullPointerException\"."
    );
    assert!(payload.get("apiError").is_none());

    let hit = &payload["results"][0];
    assert_eq!(hit["title"], "Question 9");
    assert_eq!(hit["hasAcceptedAnswer"], true);
    assert_eq!(hit["link"], "https://stackoverflow.com/a/90");
    assert_eq!(hit["score"], 90);
    assert_eq!(hit["creationDate"], "2021-01-01T00:00:00+00:00");
    assert_eq!(hit["answerText"], "<p>check for null</p>");
    assert_eq!(hit["answerIsAccepted"], true);
}

#[tokio::test]
async fn test_search_stackoverflow_payload_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let input = SearchStackOverflowInput {
        full_error: String::new(),
        language: None,
    };

    let result = tools::search_stackoverflow(&aggregator(&mock_server, false), input).await;
    let payload = serde_json::to_value(&result).unwrap();

    assert_eq!(payload["errorMessage"], "");
    assert_eq!(payload["shortExplanation"], "No error text was provided.");
    assert_eq!(payload["results"], json!([]));
    assert!(payload["apiError"].as_str().is_some_and(|e| !e.is_empty()));
}

#[test]
fn test_normalize_error_payload_shape() {
    let input: NormalizeErrorInput = serde_json::from_value(json!({
        "rawError": "2024-05-01T08:00:00Z worker-3\nTraceback (most recent call last):\n  File \"/opt/app/jobs.py\", line 88, in run\n    total += int(row)\nTypeError: unsupported operand type(s) for +=: 'int' and 'NoneType'",
    }))
    .unwrap();

    let payload = serde_json::to_value(tools::normalize_error(input)).unwrap();

    assert_eq!(
        payload,
        json!({
            "normalizedError": "TypeError: unsupported operand type(s) for +=: 'int' and 'NoneType'",
            "errorSignature": "TypeError",
            "detectedLanguage": "python",
        })
    );
}
