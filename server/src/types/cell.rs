//! A `(column, value, timestamp)` cell.
//!
//! Serialized as a three element JSON array: `["colname", 0, 0]`.

use serde::{Deserialize, Serialize, Serializer};

use super::CellValue;

/// One cell of a row.
///
/// # Invariants
///
/// - `timestamp` is seconds since the Unix epoch and is finite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "(String, CellValue, f64)")]
pub struct Cell {
    pub column: String,
    pub value: CellValue,
    pub timestamp: f64,
}

impl Cell {
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<CellValue>, timestamp: f64) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            timestamp,
        }
    }
}

impl TryFrom<(String, CellValue, f64)> for Cell {
    type Error = String;

    fn try_from((column, value, timestamp): (String, CellValue, f64)) -> Result<Self, Self::Error> {
        if !timestamp.is_finite() {
            return Err(format!("timestamp for column '{column}' is not finite"));
        }
        Ok(Self {
            column,
            value,
            timestamp,
        })
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole-second timestamps go out as integers.
        #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
        let timestamp = if self.timestamp.fract() == 0.0 && self.timestamp.abs() < 9.0e15 {
            serde_json::Number::from(self.timestamp as i64)
        } else {
            serde_json::Number::from_f64(self.timestamp)
                .unwrap_or_else(|| serde_json::Number::from(0))
        };
        (&self.column, &self.value, timestamp).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_array() {
        let cell: Cell = serde_json::from_str(r#"["colname", 0, 0]"#).unwrap();
        assert_eq!(cell, Cell::new("colname", 0, 0.0));
    }

    #[test]
    fn test_cell_to_array() {
        let text = serde_json::to_string(&Cell::new("colname", 0, 0.0)).unwrap();
        assert_eq!(text, r#"["colname",0,0]"#);

        let text = serde_json::to_string(&Cell::new("c", "v", 1.25)).unwrap();
        assert_eq!(text, r#"["c","v",1.25]"#);
    }

    #[test]
    fn test_cell_wrong_arity() {
        assert!(serde_json::from_str::<Cell>(r#"["colname", 0]"#).is_err());
        assert!(serde_json::from_str::<Cell>(r#"["colname", 0, 0, 0]"#).is_err());
    }
}
