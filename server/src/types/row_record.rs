use serde::{Deserialize, Serialize};

use super::Cell;

/// A named row and its cells, in recording order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRecord {
    pub row_name: String,
    pub columns: Vec<Cell>,
}

impl RowRecord {
    #[must_use]
    pub fn new(row_name: impl Into<String>, columns: Vec<Cell>) -> Self {
        Self {
            row_name: row_name.into(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_record_wire_format() {
        let row: RowRecord =
            serde_json::from_str(r#"{"rowName": "rowname", "columns": [["colname", 0, 0]]}"#)
                .unwrap();
        assert_eq!(row.row_name, "rowname");
        assert_eq!(row.columns, vec![Cell::new("colname", 0, 0.0)]);

        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text, r#"{"rowName":"rowname","columns":[["colname",0,0]]}"#);
    }
}
