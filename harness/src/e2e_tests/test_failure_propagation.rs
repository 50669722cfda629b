//! Failures in the setup steps stop the scenario at that step.

use crate::client::{ClientError, HttpServiceClient, ServiceClient};
use crate::e2e_tests::helpers::*;
use crate::scenario::{ScenarioConfig, ScenarioStep, run_newlines_in_sql};
use server::types::DatasetConfig;

#[tokio::test]
async fn test_existing_dataset_fails_create_step() {
    let server = TestServer::start().await;
    server
        .client()
        .create_dataset(&DatasetConfig::new("sparse.mutable", "x"))
        .await
        .unwrap();

    let err = run_newlines_in_sql(&server.client(), &ScenarioConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.step, ScenarioStep::CreateDataset);
    assert!(matches!(err.source, ClientError::Service { status: 409, .. }));
}

#[tokio::test]
async fn test_second_run_on_same_service_fails() {
    let server = TestServer::start().await;
    let config = ScenarioConfig::default();

    run_newlines_in_sql(&server.client(), &config).await.unwrap();
    let err = run_newlines_in_sql(&server.client(), &config)
        .await
        .unwrap_err();

    assert_eq!(err.step, ScenarioStep::CreateDataset);
}

#[tokio::test]
async fn test_invalid_dataset_id_fails_create_step() {
    let server = TestServer::start().await;
    let config = ScenarioConfig {
        dataset_id: "not valid".to_string(),
        ..ScenarioConfig::default()
    };

    let err = run_newlines_in_sql(&server.client(), &config)
        .await
        .unwrap_err();

    assert_eq!(err.step, ScenarioStep::CreateDataset);
    assert!(matches!(err.source, ClientError::Service { status: 400, .. }));
}

#[tokio::test]
async fn test_wrong_query_path_fails_first_query() {
    let server = TestServer::start().await;
    let config = ScenarioConfig {
        query_path: "/v1/nope".to_string(),
        ..ScenarioConfig::default()
    };

    let err = run_newlines_in_sql(&server.client(), &config)
        .await
        .unwrap_err();

    assert_eq!(err.step, ScenarioStep::SingleLineQuery);
    assert!(matches!(err.source, ClientError::Service { status: 404, .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind then drop a listener to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpServiceClient::new(&format!("http://{addr}")).unwrap();

    let err = run_newlines_in_sql(&client, &ScenarioConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.step, ScenarioStep::CreateDataset);
    assert!(matches!(err.source, ClientError::Transport(_)));
}
