//! Test recording rows before commit.

use serde_json::json;

use crate::e2e_tests::helpers::*;

#[test]
fn test_record_row_is_pending_until_commit() {
    let test = TestServer::new();
    test.create_dataset("x");

    let resp = test.record_row("x", "rowname", &json!([["colname", 0, 0]]));

    assert_eq!(resp.status, 200);
    let status = test.get("/v1/datasets/x").json();
    assert_eq!(status["pendingRowCount"], 1);
    assert_eq!(status["rowCount"], 0);
    assert_eq!(test.query("select * from x").json(), json!([]));
}

#[test]
fn test_record_row_into_missing_dataset() {
    let test = TestServer::new();

    let resp = test.record_row("x", "rowname", &json!([["colname", 0, 0]]));

    assert_eq!(resp.status, 404);
    assert_eq!(resp.error_message(), "dataset 'x' not found");
}

#[test]
fn test_record_row_rejects_bad_cell_shape() {
    let test = TestServer::new();
    test.create_dataset("x");

    let resp = test.record_row("x", "rowname", &json!([["colname", 0]]));

    assert_eq!(resp.status, 400);
}

#[test]
fn test_record_row_rejects_empty_row_name() {
    let test = TestServer::new();
    test.create_dataset("x");

    let resp = test.record_row("x", "", &json!([["colname", 0, 0]]));

    assert_eq!(resp.status, 400);
    assert_eq!(resp.error_message(), "invalid row: row name must not be empty");
}
