//! Cell value type.
//!
//! Values are JSON scalars on the wire. Numbers keep their textual form
//! (`0` stays `0`, not `0.0`) so a response echoes what was recorded.

use serde::{Deserialize, Serialize};

/// A single value stored in a dataset cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
}

impl CellValue {
    /// Create a number value from an integer.
    #[must_use]
    pub fn integer(n: i64) -> Self {
        Self::Number(serde_json::Number::from(n))
    }

    /// Create a string value.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Returns `true` if this is the null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::integer(i64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scalars() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 0, 1.5, "text"]"#).unwrap();
        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Boolean(true));
        assert_eq!(values[2], CellValue::integer(0));
        assert!(matches!(values[3], CellValue::Number(ref n) if n.as_f64() == Some(1.5)));
        assert_eq!(values[4], CellValue::string("text"));
    }

    #[test]
    fn test_integer_keeps_integer_form() {
        let text = serde_json::to_string(&CellValue::integer(0)).unwrap();
        assert_eq!(text, "0");
    }

    #[test]
    fn test_rejects_nested_values() {
        assert!(serde_json::from_str::<CellValue>("[1]").is_err());
        assert!(serde_json::from_str::<CellValue>(r#"{"a": 1}"#).is_err());
    }
}
