//! The scenario passes against a service that handles newlines correctly.

use serde_json::{Value, json};

use crate::e2e_tests::helpers::*;
use crate::scenario::{ComparisonMode, ScenarioConfig, run_newlines_in_sql};
use crate::report::ScenarioStatus;
use crate::client::ServiceClient;

#[tokio::test]
async fn test_scenario_reports_success() {
    let server = TestServer::start().await;
    let client = RecordingClient::new(server.client());

    let report = run_newlines_in_sql(&client, &ScenarioConfig::default())
        .await
        .unwrap();

    assert_eq!(report.status, ScenarioStatus::Success);
    assert_eq!(report.status.as_str(), "success");
    assert!(!report.broken);
    assert_eq!(report.responses.len(), 2);
    assert_eq!(client.logged().len(), 2);
}

#[tokio::test]
async fn test_both_queries_return_the_recorded_row() {
    let server = TestServer::start().await;
    let client = RecordingClient::new(server.client());

    let report = run_newlines_in_sql(&client, &ScenarioConfig::default())
        .await
        .unwrap();

    let expected = json!([{"rowName": "rowname", "columns": [["colname", 0, 0]]}]);
    for response in &report.responses {
        assert_eq!(response.status, 200);
        let body: Value = serde_json::from_str(&response.text).unwrap();
        assert_eq!(body, expected);
    }
    assert_eq!(report.responses[0].text, report.responses[1].text);
    assert_eq!(
        client.logged(),
        vec![report.responses[0].text.clone(), report.responses[1].text.clone()]
    );
}

#[tokio::test]
async fn test_compare_mode_passes_on_correct_service() {
    let server = TestServer::start().await;
    let config = ScenarioConfig {
        comparison: ComparisonMode::Compare,
        ..ScenarioConfig::default()
    };

    let report = run_newlines_in_sql(&server.client(), &config).await.unwrap();

    assert_eq!(report.status, ScenarioStatus::Success);
    assert!(!report.broken);
}

#[tokio::test]
async fn test_dataset_is_left_in_place() {
    let server = TestServer::start().await;
    run_newlines_in_sql(&server.client(), &ScenarioConfig::default())
        .await
        .unwrap();

    let response = server.client().get("/v1/datasets/x", &[]).await.unwrap();
    let status: Value = serde_json::from_str(&response.text).unwrap();

    assert_eq!(status["committed"], true);
    assert_eq!(status["rowCount"], 1);
}

#[tokio::test]
async fn test_scenario_with_custom_dataset_id() {
    let server = TestServer::start().await;
    let config = ScenarioConfig {
        dataset_id: "newline_regression".to_string(),
        ..ScenarioConfig::default()
    };

    let report = run_newlines_in_sql(&server.client(), &config).await.unwrap();

    assert_eq!(report.status, ScenarioStatus::Success);
}
