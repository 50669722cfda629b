// Life of a scenario run:
// 1. Load `HarnessConfig` from the environment
// 2. Build an `HttpServiceClient` for the service under test
// 3. Run the scenario step by step; the first error stops the run
// 4. Report the final status string to the caller
//
// Components:
//  - Service client (capability set the scenario consumes)
//  - Scenario
//  - Report

pub mod client;
pub mod config;
mod e2e_tests;
pub mod report;
pub mod scenario;

pub use client::{ClientError, DatasetHandle, HttpServiceClient, Response, ServiceClient};
pub use report::{ScenarioReport, ScenarioStatus};
pub use scenario::{ComparisonMode, ScenarioConfig, ScenarioError, run_newlines_in_sql};
