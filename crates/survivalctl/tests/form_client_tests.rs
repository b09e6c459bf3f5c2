//! Form client against a mocked relay.

use approx::assert_relative_eq;
use serde_json::json;
use survival_common::{Bucket, Field, Gradient};
use survivalctl::form::FormClient;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn relay_reply(label: serde_json::Value) -> serde_json::Value {
    json!({
        "Results": {
            "WebServiceOutput0": [{
                "age_years": 81,
                "sex_0male_1female": 0,
                "episode_number": 1,
                "Scored Labels": label
            }]
        }
    })
}

async fn client_for(mock_server: &MockServer) -> FormClient {
    let mut client = FormClient::new(format!("{}/api/score", mock_server.uri())).unwrap();
    client.update(Field::AgeYears, "81");
    client.update(Field::EpisodeNumber, "1");
    client
}

#[tokio::test]
async fn test_submit_sends_envelope_and_buckets_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/score"))
        .and(body_json(json!({
            "Inputs": {
                "input1": [
                    { "age_years": 81, "sex_0male_1female": 0, "episode_number": 1 }
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(relay_reply(json!(0.95))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.submit().await.unwrap();

    let result = client.result().unwrap();
    assert_relative_eq!(result.assessment.score.percent(), 95.0, epsilon = 1e-9);
    assert_eq!(result.assessment.bucket, Bucket::Favorable);
    assert_eq!(result.assessment.gradient, Gradient::GREEN);
    assert!(client.error().is_none());
    assert!(!client.is_in_flight());
}

#[tokio::test]
async fn test_submit_label_above_one_is_capped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(relay_reply(json!(1.4))))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.submit().await.unwrap();

    let result = client.result().unwrap();
    assert_relative_eq!(result.assessment.score.percent(), 100.0);
    assert!(result.assessment.message.contains("100.0%"));
}

#[tokio::test]
async fn test_submit_text_label_without_number_is_low_survival() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(relay_reply(json!("n/a"))))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.submit().await.unwrap();

    let result = client.result().unwrap();
    assert_relative_eq!(result.assessment.score.percent(), 0.0);
    assert_eq!(result.assessment.bucket, Bucket::LowSurvival);
}

#[tokio::test]
async fn test_submit_relay_failure_stores_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Backend error: Bad Gateway" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.submit().await.unwrap();

    assert!(client.result().is_none());
    assert_eq!(client.error(), Some("Error: 500 Internal Server Error"));
    assert!(!client.is_in_flight());
}

#[tokio::test]
async fn test_submit_unexpected_shape_stores_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Results": {} })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.submit().await.unwrap();

    assert!(client.result().is_none());
    assert!(client.error().is_some());
}

#[tokio::test]
async fn test_new_submission_clears_previous_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(relay_reply(json!(0.85))))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.submit().await.unwrap();
    assert_eq!(client.result().unwrap().assessment.bucket, Bucket::Moderate);

    client.submit().await.unwrap();
    assert!(client.result().is_none());
    assert_eq!(client.error(), Some("Error: 502 Bad Gateway"));
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server).await;
    client.update(Field::AgeYears, "");

    assert!(client.submit().await.is_err());
    assert!(client.error().is_none());
    assert!(!client.is_in_flight());
}
