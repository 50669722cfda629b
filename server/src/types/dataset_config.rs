use serde::{Deserialize, Serialize};

/// Configuration sent when creating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Storage strategy tag, e.g. `sparse.mutable`.
    #[serde(rename = "type")]
    pub dataset_type: String,
    /// Unique dataset name.
    pub id: String,
}

impl DatasetConfig {
    #[must_use]
    pub fn new(dataset_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            dataset_type: dataset_type.into(),
            id: id.into(),
        }
    }
}

/// Status of a dataset as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatus {
    pub id: String,
    #[serde(rename = "type")]
    pub dataset_type: String,
    /// Whether at least one commit happened.
    pub committed: bool,
    /// Number of committed rows.
    pub row_count: usize,
    /// Number of rows recorded but not yet committed.
    pub pending_row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_uses_type_key() {
        let config: DatasetConfig =
            serde_json::from_str(r#"{"type": "sparse.mutable", "id": "x"}"#).unwrap();
        assert_eq!(config, DatasetConfig::new("sparse.mutable", "x"));
    }

    #[test]
    fn test_config_requires_id() {
        assert!(serde_json::from_str::<DatasetConfig>(r#"{"type": "sparse.mutable"}"#).is_err());
    }
}
