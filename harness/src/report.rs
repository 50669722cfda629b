//! Final status reported to the invoking harness.

use crate::client::Response;

/// Status string handed back to whoever invoked the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioStatus {
    Success,
    Failure,
}

impl ScenarioStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    /// Process exit code for this status.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl std::fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a scenario that ran to completion.
#[derive(Debug, PartialEq, Eq)]
pub struct ScenarioReport {
    pub status: ScenarioStatus,
    /// Set when the responses were compared and found to differ.
    pub broken: bool,
    /// Query responses, in the order the queries were issued.
    pub responses: Vec<Response>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(ScenarioStatus::Success.to_string(), "success");
        assert_eq!(ScenarioStatus::Failure.as_str(), "failure");
        assert_eq!(ScenarioStatus::Success.exit_code(), 0);
        assert_eq!(ScenarioStatus::Failure.exit_code(), 1);
    }
}
