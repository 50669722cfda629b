//! Newlines-in-SQL regression scenario.
//!
//! A dataset is created, given one row and committed. The same `SELECT` is
//! then issued twice, once on a single line and once with a newline between
//! `*` and `FROM`. Both raw responses are logged. A service that mis-handles
//! the newline fails the second query, which aborts the scenario.
//!
//! The steps run strictly in order and nothing is retried: the first error
//! ends the scenario and no status is reported.

use server::SPARSE_MUTABLE_DATASET_TYPE;
use server::types::{Cell, DatasetConfig};

use crate::client::{ClientError, ServiceClient};
use crate::report::{ScenarioReport, ScenarioStatus};

/// How the two query responses feed into the final status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Log both responses and report success whenever both queries return.
    #[default]
    LogOnly,
    /// Also compare the response texts; any difference marks the run broken
    /// and reports failure.
    Compare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    pub dataset_id: String,
    pub query_path: String,
    pub comparison: ComparisonMode,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            dataset_id: "x".to_string(),
            query_path: "/v1/query".to_string(),
            comparison: ComparisonMode::LogOnly,
        }
    }
}

impl ScenarioConfig {
    /// The single-line statement: `select * from <id>`.
    #[must_use]
    pub fn single_line_query(&self) -> String {
        format!("select * from {}", self.dataset_id)
    }

    /// The same statement with a newline before `from`.
    #[must_use]
    pub fn multi_line_query(&self) -> String {
        format!("select *\nfrom {}", self.dataset_id)
    }
}

/// Scenario step, used to say where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStep {
    CreateDataset,
    RecordRow,
    Commit,
    SingleLineQuery,
    MultiLineQuery,
}

impl std::fmt::Display for ScenarioStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CreateDataset => "create dataset",
            Self::RecordRow => "record row",
            Self::Commit => "commit",
            Self::SingleLineQuery => "single-line query",
            Self::MultiLineQuery => "multi-line query",
        };
        f.write_str(name)
    }
}

/// A step failed and the scenario stopped.
#[derive(Debug)]
pub struct ScenarioError {
    pub step: ScenarioStep,
    pub source: ClientError,
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.step, self.source)
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

trait AtStep<T> {
    fn at(self, step: ScenarioStep) -> Result<T, ScenarioError>;
}

impl<T> AtStep<T> for Result<T, ClientError> {
    fn at(self, step: ScenarioStep) -> Result<T, ScenarioError> {
        self.map_err(|source| ScenarioError { step, source })
    }
}

/// Run the scenario against `client`.
pub async fn run_newlines_in_sql<C: ServiceClient>(
    client: &C,
    config: &ScenarioConfig,
) -> Result<ScenarioReport, ScenarioError> {
    let dataset = client
        .create_dataset(&DatasetConfig::new(
            SPARSE_MUTABLE_DATASET_TYPE,
            config.dataset_id.as_str(),
        ))
        .await
        .at(ScenarioStep::CreateDataset)?;

    dataset
        .record_row(client, "rowname", vec![Cell::new("colname", 0, 0.0)])
        .await
        .at(ScenarioStep::RecordRow)?;

    dataset.commit(client).await.at(ScenarioStep::Commit)?;

    let single = config.single_line_query();
    let multi = config.multi_line_query();
    let responses = vec![
        client
            .get(&config.query_path, &[("q", single.as_str())])
            .await
            .at(ScenarioStep::SingleLineQuery)?,
        client
            .get(&config.query_path, &[("q", multi.as_str())])
            .await
            .at(ScenarioStep::MultiLineQuery)?,
    ];

    let mut broken = false;
    for response in &responses {
        client.log(&response.text);
    }
    if config.comparison == ComparisonMode::Compare && responses[0].text != responses[1].text {
        tracing::warn!("single-line and multi-line queries returned different results");
        broken = true;
    }

    let status = if broken {
        ScenarioStatus::Failure
    } else {
        ScenarioStatus::Success
    };

    Ok(ScenarioReport {
        status,
        broken,
        responses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_queries() {
        let config = ScenarioConfig::default();
        assert_eq!(config.single_line_query(), "select * from x");
        assert_eq!(config.multi_line_query(), "select *\nfrom x");
    }

    #[test]
    fn test_error_names_the_step() {
        let err = ScenarioError {
            step: ScenarioStep::MultiLineQuery,
            source: ClientError::Service {
                status: 400,
                body: "bad".to_string(),
            },
        };
        assert_eq!(err.to_string(), "multi-line query failed: service returned 400: bad");
    }
}
