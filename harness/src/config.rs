//! Harness configuration module.
//!
//! # Environment Variables
//!
//! - `DATASET_SERVER_URL`: Base URL of the service under test (default: `http://127.0.0.1:3000`)
//! - `SCENARIO_DATASET_ID`: Dataset the scenario creates and queries (default: `x`)
//! - `SCENARIO_COMPARE_RESULTS`: `true` to fail when the two query responses differ (default: `false`)

use crate::scenario::{ComparisonMode, ScenarioConfig};

pub const SERVER_URL_VAR: &str = "DATASET_SERVER_URL";
pub const DATASET_ID_VAR: &str = "SCENARIO_DATASET_ID";
pub const COMPARE_RESULTS_VAR: &str = "SCENARIO_COMPARE_RESULTS";

/// Harness configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Base URL of the service, without a trailing slash.
    pub server_url: String,
    pub scenario: ScenarioConfig,
}

/// Error returned when loading configuration fails.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl HarnessConfig {
    /// Default service URL.
    pub const DEFAULT_SERVER_URL: &'static str = "http://127.0.0.1:3000";

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_url = lookup(SERVER_URL_VAR)
            .unwrap_or_else(|| Self::DEFAULT_SERVER_URL.to_string());
        // The client is built without TLS support.
        if !server_url.starts_with("http://") {
            return Err(ConfigError::InvalidValue {
                name: SERVER_URL_VAR.to_string(),
                message: format!("'{server_url}' must start with http://"),
            });
        }
        let server_url = server_url.trim_end_matches('/').to_string();

        let mut scenario = ScenarioConfig::default();

        if let Some(id) = lookup(DATASET_ID_VAR) {
            if id.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: DATASET_ID_VAR.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            scenario.dataset_id = id;
        }

        if let Some(value) = lookup(COMPARE_RESULTS_VAR) {
            scenario.comparison = match value.to_ascii_lowercase().as_str() {
                "true" | "1" => ComparisonMode::Compare,
                "false" | "0" => ComparisonMode::LogOnly,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: COMPARE_RESULTS_VAR.to_string(),
                        message: format!("'{value}' is not a boolean"),
                    });
                }
            };
        }

        Ok(Self {
            server_url,
            scenario,
        })
    }
}
