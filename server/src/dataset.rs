//! In-memory `sparse.mutable` dataset.
//!
//! Rows are recorded into a pending buffer and only become visible to
//! queries once `commit` moves them into the committed list.
//!
//! # Invariants
//!
//! - `rows()` never returns a pending row
//! - committed rows keep their recording order
//! - every stored row has a non-empty name and non-empty column names

use crate::types::{DatasetStatus, RowRecord};

/// Errors produced by dataset operations.
#[derive(Debug, PartialEq, Eq)]
pub enum DatasetError {
    /// The row shape was rejected.
    InvalidRow(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRow(message) => write!(f, "invalid row: {message}"),
        }
    }
}

impl std::error::Error for DatasetError {}

/// A mutable dataset with commit semantics.
#[derive(Debug)]
pub struct Dataset {
    id: String,
    dataset_type: String,
    committed: Vec<RowRecord>,
    pending: Vec<RowRecord>,
    commit_count: u64,
}

impl Dataset {
    #[must_use]
    pub fn new(id: impl Into<String>, dataset_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dataset_type: dataset_type.into(),
            committed: Vec::new(),
            pending: Vec::new(),
            commit_count: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record a row. It stays invisible until the next commit.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::InvalidRow` if the row name or any column name
    /// is empty.
    pub fn record_row(&mut self, row: RowRecord) -> Result<(), DatasetError> {
        if row.row_name.is_empty() {
            return Err(DatasetError::InvalidRow("row name must not be empty".to_string()));
        }
        if let Some(index) = row.columns.iter().position(|c| c.column.is_empty()) {
            return Err(DatasetError::InvalidRow(format!(
                "column name at index {index} of row '{}' must not be empty",
                row.row_name
            )));
        }
        self.pending.push(row);
        Ok(())
    }

    /// Make all pending rows queryable. Returns how many rows were committed.
    pub fn commit(&mut self) -> usize {
        let count = self.pending.len();
        self.committed.append(&mut self.pending);
        self.commit_count += 1;
        count
    }

    /// Committed rows, in recording order.
    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        &self.committed
    }

    #[must_use]
    pub fn status(&self) -> DatasetStatus {
        DatasetStatus {
            id: self.id.clone(),
            dataset_type: self.dataset_type.clone(),
            committed: self.commit_count > 0,
            row_count: self.committed.len(),
            pending_row_count: self.pending.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn row(name: &str) -> RowRecord {
        RowRecord::new(name, vec![Cell::new("colname", 0, 0.0)])
    }

    #[test]
    fn test_rows_invisible_until_commit() {
        let mut dataset = Dataset::new("x", "sparse.mutable");
        dataset.record_row(row("rowname")).unwrap();

        assert!(dataset.rows().is_empty());
        assert_eq!(dataset.status().pending_row_count, 1);
        assert!(!dataset.status().committed);

        assert_eq!(dataset.commit(), 1);
        assert_eq!(dataset.rows(), &[row("rowname")]);
        assert!(dataset.status().committed);
        assert_eq!(dataset.status().pending_row_count, 0);
    }

    #[test]
    fn test_commit_keeps_recording_order() {
        let mut dataset = Dataset::new("x", "sparse.mutable");
        dataset.record_row(row("b")).unwrap();
        dataset.record_row(row("a")).unwrap();
        dataset.commit();
        dataset.record_row(row("c")).unwrap();
        dataset.commit();

        let names: Vec<&str> = dataset.rows().iter().map(|r| r.row_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_commit_is_allowed() {
        let mut dataset = Dataset::new("x", "sparse.mutable");
        assert_eq!(dataset.commit(), 0);
        assert_eq!(dataset.commit(), 0);
        assert!(dataset.status().committed);
    }

    #[test]
    fn test_rejects_empty_row_name() {
        let mut dataset = Dataset::new("x", "sparse.mutable");
        let err = dataset.record_row(row("")).unwrap_err();
        assert_eq!(err.to_string(), "invalid row: row name must not be empty");
    }

    #[test]
    fn test_rejects_empty_column_name() {
        let mut dataset = Dataset::new("x", "sparse.mutable");
        let bad = RowRecord::new(
            "r",
            vec![Cell::new("ok", 1, 0.0), Cell::new("", 2, 0.0)],
        );
        assert!(matches!(
            dataset.record_row(bad),
            Err(DatasetError::InvalidRow(_))
        ));
        assert_eq!(dataset.status().pending_row_count, 0);
    }
}
