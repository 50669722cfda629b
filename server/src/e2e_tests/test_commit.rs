//! Test that commit makes recorded rows queryable.

use serde_json::json;

use crate::e2e_tests::helpers::*;

#[test]
fn test_commit_makes_dataset_queryable() {
    let test = TestServer::new();
    test.create_dataset("x");
    test.record_row("x", "rowname", &json!([["colname", 0, 0]]));

    let resp = test.commit("x");

    assert_eq!(resp.status, 200);
    assert_eq!(resp.json()["committed"], true);
    assert_eq!(resp.json()["rowCount"], 1);

    let query = test.query("select * from x");
    assert_eq!(query.status, 200);
    assert_eq!(
        query.json(),
        json!([{"rowName": "rowname", "columns": [["colname", 0, 0]]}])
    );
}

#[test]
fn test_commit_missing_dataset() {
    let test = TestServer::new();

    assert_eq!(test.commit("x").status, 404);
}

#[test]
fn test_second_commit_appends() {
    let test = TestServer::new();
    test.seed("x", "first", &json!([["a", 1, 0]]));
    test.record_row("x", "second", &json!([["a", 2, 0]]));
    test.commit("x");

    let rows = test.query("select * from x").json();

    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[1]["rowName"], "second");
}
