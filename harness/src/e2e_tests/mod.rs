//! End-to-end tests of the scenario against a live server.
//!
//! Each test starts the dataset server on an ephemeral port. Services that
//! mis-handle newlines are simulated by wrapping the HTTP client.

#![cfg(test)]

mod helpers;

mod test_broken_service;
mod test_failure_propagation;
mod test_newlines_in_sql;
