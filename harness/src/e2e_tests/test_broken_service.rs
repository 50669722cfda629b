//! A service that mis-handles newlines in SQL makes the scenario fail.

use crate::client::ClientError;
use crate::e2e_tests::helpers::*;
use crate::report::ScenarioStatus;
use crate::scenario::{ComparisonMode, ScenarioConfig, ScenarioStep, run_newlines_in_sql};

#[tokio::test]
async fn test_rejected_newline_query_aborts_scenario() {
    let server = TestServer::start().await;
    let client = RecordingClient::new(NewlineFaultyClient {
        inner: server.client(),
        fault: NewlineFault::Reject,
    });

    let err = run_newlines_in_sql(&client, &ScenarioConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.step, ScenarioStep::MultiLineQuery);
    assert!(matches!(err.source, ClientError::Service { status: 400, .. }));
    // Nothing is logged when a query fails.
    assert!(client.logged().is_empty());
}

#[tokio::test]
async fn test_differing_results_are_logged_but_pass_in_log_only_mode() {
    let server = TestServer::start().await;
    let client = RecordingClient::new(NewlineFaultyClient {
        inner: server.client(),
        fault: NewlineFault::EmptyResult,
    });

    let report = run_newlines_in_sql(&client, &ScenarioConfig::default())
        .await
        .unwrap();

    assert_eq!(report.status, ScenarioStatus::Success);
    assert!(!report.broken);
    assert_ne!(report.responses[0].text, report.responses[1].text);
    assert_eq!(client.logged().len(), 2);
}

#[tokio::test]
async fn test_differing_results_fail_in_compare_mode() {
    let server = TestServer::start().await;
    let client = NewlineFaultyClient {
        inner: server.client(),
        fault: NewlineFault::EmptyResult,
    };
    let config = ScenarioConfig {
        comparison: ComparisonMode::Compare,
        ..ScenarioConfig::default()
    };

    let report = run_newlines_in_sql(&client, &config).await.unwrap();

    assert_eq!(report.status, ScenarioStatus::Failure);
    assert_eq!(report.status.as_str(), "failure");
    assert!(report.broken);
}
