//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario. Every test starts its own
//! server on an ephemeral port and talks to it over real HTTP.

#![cfg(test)]

mod helpers;

mod test_commit;
mod test_create_dataset;
mod test_query_errors;
mod test_query_whitespace;
mod test_record_row;
