//! Evaluates a parsed `SELECT` against the dataset registry.

use super::QueryError;
use super::parser::{Projection, Select};
use crate::dataset_registry::{DatasetRegistry, RegistryError};
use crate::types::{Cell, RowRecord};

/// Run a statement and return the matching rows.
///
/// Only committed rows are visible. With a column list, each row keeps its
/// name and carries the requested cells in the order the columns were named.
///
/// # Errors
///
/// Returns `DatasetNotFound` if the `FROM` dataset does not exist, or
/// `LockPoisoned`.
pub fn execute(select: &Select, registry: &DatasetRegistry) -> Result<Vec<RowRecord>, QueryError> {
    let dataset = registry.get(&select.from).map_err(|e| match e {
        RegistryError::NotFound(id) => QueryError::DatasetNotFound(id),
        _ => QueryError::LockPoisoned,
    })?;
    let dataset = dataset.read().map_err(|_| QueryError::LockPoisoned)?;

    let limit = select
        .limit
        .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

    let rows = dataset
        .rows()
        .iter()
        .take(limit)
        .map(|row| RowRecord {
            row_name: row.row_name.clone(),
            columns: project(&select.projection, &row.columns),
        })
        .collect();

    Ok(rows)
}

fn project(projection: &Projection, cells: &[Cell]) -> Vec<Cell> {
    match projection {
        Projection::All => cells.to_vec(),
        Projection::Columns(columns) => columns
            .iter()
            .flat_map(|name| cells.iter().filter(move |c| &c.column == name))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse;
    use crate::types::DatasetConfig;

    fn registry_with_rows() -> DatasetRegistry {
        let registry = DatasetRegistry::new();
        let dataset = registry
            .create(&DatasetConfig::new("sparse.mutable", "x"))
            .unwrap();
        let mut dataset = dataset.write().unwrap();
        dataset
            .record_row(RowRecord::new(
                "r1",
                vec![Cell::new("a", 1, 0.0), Cell::new("b", "one", 0.0)],
            ))
            .unwrap();
        dataset
            .record_row(RowRecord::new("r2", vec![Cell::new("b", "two", 5.0)]))
            .unwrap();
        dataset.commit();
        drop(dataset);
        registry
    }

    fn run(sql: &str, registry: &DatasetRegistry) -> Result<Vec<RowRecord>, QueryError> {
        execute(&parse(sql)?, registry)
    }

    #[test]
    fn test_select_star_returns_all_cells() {
        let registry = registry_with_rows();
        let rows = run("select * from x", &registry).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].columns.len(), 2);
        assert_eq!(rows[1].columns, vec![Cell::new("b", "two", 5.0)]);
    }

    #[test]
    fn test_newline_query_matches_single_line_query() {
        let registry = registry_with_rows();
        let single = run("select * from x", &registry).unwrap();
        let multi = run("select *\nfrom x", &registry).unwrap();
        assert_eq!(single, multi);
    }

    #[test]
    fn test_column_projection() {
        let registry = registry_with_rows();
        let rows = run("select b, a from x", &registry).unwrap();
        assert_eq!(
            rows[0].columns,
            vec![Cell::new("b", "one", 0.0), Cell::new("a", 1, 0.0)]
        );
        // Row keeps its name even without a matching cell.
        let rows = run("select a from x", &registry).unwrap();
        assert_eq!(rows[1].row_name, "r2");
        assert!(rows[1].columns.is_empty());
    }

    #[test]
    fn test_limit() {
        let registry = registry_with_rows();
        let rows = run("select * from x limit 1", &registry).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_name, "r1");
        assert!(run("select * from x limit 0", &registry).unwrap().is_empty());
    }

    #[test]
    fn test_uncommitted_rows_are_invisible() {
        let registry = registry_with_rows();
        registry
            .get("x")
            .unwrap()
            .write()
            .unwrap()
            .record_row(RowRecord::new("r3", vec![Cell::new("a", 3, 0.0)]))
            .unwrap();
        assert_eq!(run("select * from x", &registry).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_dataset() {
        let registry = DatasetRegistry::new();
        assert_eq!(
            run("select * from y", &registry).unwrap_err(),
            QueryError::DatasetNotFound("y".to_string())
        );
    }
}
