//! Test query error responses.

use crate::e2e_tests::helpers::*;

#[test]
fn test_query_unknown_dataset() {
    let test = TestServer::new();

    let resp = test.query("select * from nope");

    assert_eq!(resp.status, 404);
    assert_eq!(resp.error_message(), "dataset 'nope' not found");
}

#[test]
fn test_query_syntax_error_reports_offset() {
    let test = TestServer::new();
    test.create_dataset("x");

    let resp = test.query("select *\nfrum x");

    assert_eq!(resp.status, 400);
    assert!(resp.error_message().starts_with("syntax error at offset 9"));
}

#[test]
fn test_query_missing_q_parameter() {
    let test = TestServer::new();

    let resp = test.get("/v1/query");

    assert_eq!(resp.status, 400);
    assert_eq!(resp.json()["httpCode"], 400);
}
