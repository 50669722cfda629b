//! Test that whitespace inside SQL, including newlines, does not change results.

use serde_json::json;

use crate::e2e_tests::helpers::*;

#[test]
fn test_newline_in_sql_matches_single_line() {
    let test = TestServer::new();
    test.seed("x", "rowname", &json!([["colname", 0, 0]]));

    let single = test.query("select * from x");
    let multi = test.query("select *\nfrom x");

    assert_eq!(single.status, 200);
    assert_eq!(multi.status, 200);
    assert_eq!(single.text, multi.text);
}

#[test]
fn test_other_whitespace_matches_single_line() {
    let test = TestServer::new();
    test.seed("x", "rowname", &json!([["colname", 0, 0]]));
    let expected = test.query("select * from x").text;

    for sql in [
        "select *\r\nfrom x",
        "select\t*\tfrom\tx",
        "\n\nselect\n*\nfrom\nx\n\n",
        "SELECT *\n  FROM x;",
    ] {
        let resp = test.query(sql);
        assert_eq!(resp.status, 200, "{sql:?}");
        assert_eq!(resp.text, expected, "{sql:?}");
    }
}

#[test]
fn test_newline_in_column_list() {
    let test = TestServer::new();
    test.seed("x", "rowname", &json!([["a", 1, 0], ["b", 2, 0]]));

    let resp = test.query("select b,\na\nfrom x\nlimit 1");

    assert_eq!(
        resp.json(),
        json!([{"rowName": "rowname", "columns": [["b", 2, 0], ["a", 1, 0]]}])
    );
}
