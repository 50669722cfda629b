//! Dataset service operations.
//!
//! `DatasetService` holds the registry and implements every operation the
//! HTTP routes expose. The routes in `http` only translate requests and
//! errors; tests call the service directly.

use crate::constants::MAX_QUERY_LENGTH;
use crate::dataset::DatasetError;
use crate::dataset_registry::{DatasetRegistry, RegistryError};
use crate::query::{self, QueryError};
use crate::types::{DatasetConfig, DatasetStatus, RowRecord};

/// Errors surfaced by service operations.
#[derive(Debug, PartialEq, Eq)]
pub enum ServiceError {
    Registry(RegistryError),
    Dataset(DatasetError),
    Query(QueryError),
    /// The SQL statement exceeds `MAX_QUERY_LENGTH`.
    QueryTooLong(usize),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "{e}"),
            Self::Dataset(e) => write!(f, "{e}"),
            Self::Query(e) => write!(f, "{e}"),
            Self::QueryTooLong(len) => write!(
                f,
                "query of {len} bytes exceeds maximum length of {MAX_QUERY_LENGTH} bytes"
            ),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Dataset(e) => Some(e),
            Self::Query(e) => Some(e),
            Self::QueryTooLong(_) => None,
        }
    }
}

impl From<RegistryError> for ServiceError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<DatasetError> for ServiceError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

impl From<QueryError> for ServiceError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

#[derive(Default)]
pub struct DatasetService {
    registry: DatasetRegistry,
}

impl DatasetService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset.
    pub fn create_dataset(&self, config: &DatasetConfig) -> Result<DatasetStatus, ServiceError> {
        let dataset = self.registry.create(config)?;
        let status = dataset
            .read()
            .map_err(|_| RegistryError::LockPoisoned)?
            .status();
        Ok(status)
    }

    /// Record one row into a dataset. The row is visible after the next commit.
    pub fn record_row(&self, id: &str, row: RowRecord) -> Result<(), ServiceError> {
        let dataset = self.registry.get(id)?;
        let mut dataset = dataset.write().map_err(|_| RegistryError::LockPoisoned)?;
        tracing::debug!(
            "Recording row '{}' with {} cells into '{}'",
            row.row_name,
            row.columns.len(),
            id
        );
        dataset.record_row(row)?;
        Ok(())
    }

    /// Commit pending rows.
    pub fn commit(&self, id: &str) -> Result<DatasetStatus, ServiceError> {
        let dataset = self.registry.get(id)?;
        let mut dataset = dataset.write().map_err(|_| RegistryError::LockPoisoned)?;
        let committed = dataset.commit();
        tracing::info!("Committed {} rows to dataset '{}'", committed, id);
        Ok(dataset.status())
    }

    pub fn get_dataset(&self, id: &str) -> Result<DatasetStatus, ServiceError> {
        let dataset = self.registry.get(id)?;
        let status = dataset
            .read()
            .map_err(|_| RegistryError::LockPoisoned)?
            .status();
        Ok(status)
    }

    /// Parse and run a SQL statement.
    pub fn query(&self, sql: &str) -> Result<Vec<RowRecord>, ServiceError> {
        if sql.len() > MAX_QUERY_LENGTH {
            return Err(ServiceError::QueryTooLong(sql.len()));
        }
        tracing::debug!("Running query {sql:?}");
        let select = query::parse(sql)?;
        let rows = query::execute(&select, &self.registry)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_full_lifecycle() {
        let service = DatasetService::new();
        let status = service
            .create_dataset(&DatasetConfig::new("sparse.mutable", "x"))
            .unwrap();
        assert!(!status.committed);

        service
            .record_row("x", RowRecord::new("rowname", vec![Cell::new("colname", 0, 0.0)]))
            .unwrap();
        assert_eq!(service.get_dataset("x").unwrap().pending_row_count, 1);

        let status = service.commit("x").unwrap();
        assert!(status.committed);
        assert_eq!(status.row_count, 1);

        let rows = service.query("select * from x").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_record_into_missing_dataset() {
        let service = DatasetService::new();
        assert_eq!(
            service
                .record_row("x", RowRecord::new("r", vec![]))
                .unwrap_err(),
            ServiceError::Registry(RegistryError::NotFound("x".to_string()))
        );
    }

    #[test]
    fn test_query_too_long() {
        let service = DatasetService::new();
        let sql = format!("select * from {}", "x".repeat(MAX_QUERY_LENGTH));
        assert!(matches!(
            service.query(&sql),
            Err(ServiceError::QueryTooLong(_))
        ));
    }
}
