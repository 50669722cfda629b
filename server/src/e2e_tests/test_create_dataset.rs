//! Test dataset creation and its error cases.

use serde_json::json;

use crate::e2e_tests::helpers::*;

#[test]
fn test_create_sparse_mutable_dataset() {
    let test = TestServer::new();

    let resp = test.create_dataset("x");

    assert_eq!(resp.status, 201);
    let body = resp.json();
    assert_eq!(body["id"], "x");
    assert_eq!(body["type"], "sparse.mutable");
    assert_eq!(body["committed"], false);
}

#[test]
fn test_create_duplicate_dataset_conflicts() {
    let test = TestServer::new();
    assert_eq!(test.create_dataset("x").status, 201);

    let resp = test.create_dataset("x");

    assert_eq!(resp.status, 409);
    assert_eq!(resp.json()["httpCode"], 409);
    assert_eq!(resp.error_message(), "dataset 'x' already exists");
}

#[test]
fn test_create_unknown_type_is_rejected() {
    let test = TestServer::new();

    let resp = test.post("/v1/datasets", &json!({"type": "beh.mutable", "id": "x"}));

    assert_eq!(resp.status, 400);
    assert!(resp.error_message().contains("unknown dataset type 'beh.mutable'"));
    assert_eq!(test.get("/v1/datasets/x").status, 404);
}

#[test]
fn test_create_invalid_id_is_rejected() {
    let test = TestServer::new();

    let resp = test.create_dataset("../x");

    assert_eq!(resp.status, 400);
}

#[test]
fn test_create_missing_id_is_rejected() {
    let test = TestServer::new();

    let resp = test.post("/v1/datasets", &json!({"type": "sparse.mutable"}));

    assert_eq!(resp.status, 400);
    assert_eq!(resp.json()["httpCode"], 400);
}
