//! Result types for query execution.
//!
//! Defines the tabular structure returned by the executor: ordered column
//! names plus fully materialized rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the result of executing a SQL query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabularResult {
    /// Ordered column names from the result metadata.
    pub columns: Vec<String>,

    /// Rows of data, each aligned to `columns`.
    pub rows: Vec<Row>,
}

impl TabularResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result with the given columns and rows.
    pub fn with_data(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Builds the single-column, single-row error table the pipeline
    /// returns when translation or execution fails.
    pub fn error_table(message: impl Into<String>) -> Self {
        Self {
            columns: vec!["Error".to_string()],
            rows: vec![vec![Value::String(message.into())]],
        }
    }

    /// Returns true if the result set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Renders the result as plain text, one row per line with a header.
    ///
    /// Column widths fit the widest cell. Meant for terminal output only.
    pub fn render_text(&self) -> String {
        if self.columns.is_empty() {
            return String::from("(no columns)");
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        let rendered_rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Value::to_display_string).collect())
            .collect();
        for row in &rendered_rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut out = String::new();
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", col, width = widths[i]));
        }
        out.push('\n');
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&"-".repeat(*width));
        }
        for row in &rendered_rows {
            out.push('\n');
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    out.push_str("  ");
                }
                let width = widths.get(i).copied().unwrap_or(cell.len());
                out.push_str(&format!("{:<width$}", cell, width = width));
            }
        }
        out
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Represents a single scalar value from a database query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts the value to a string representation for display.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("<{} bytes>", b.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_display_string(), "NULL");
        assert_eq!(Value::Bool(true).to_display_string(), "true");
        assert_eq!(Value::Int(42).to_display_string(), "42");
        assert_eq!(Value::Float(2.71).to_display_string(), "2.71");
        assert_eq!(
            Value::String("hello".to_string()).to_display_string(),
            "hello"
        );
        assert_eq!(Value::Bytes(vec![1, 2, 3]).to_display_string(), "<3 bytes>");
    }

    #[test]
    fn test_value_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(Some(7_i64)), Value::Int(7));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_with_data() {
        let result = TabularResult::with_data(
            vec!["x".to_string()],
            vec![vec![Value::Int(1)], vec![Value::Int(2)]],
        );
        assert_eq!(result.row_count(), 2);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_error_table_shape() {
        let result = TabularResult::error_table("boom");
        assert_eq!(result.columns, vec!["Error".to_string()]);
        assert_eq!(result.rows, vec![vec![Value::String("boom".to_string())]]);
    }

    #[test]
    fn test_render_text_aligns_columns() {
        let result = TabularResult::with_data(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Value::Int(1), Value::String("ada".to_string())],
                vec![Value::Int(22), Value::String("grace".to_string())],
            ],
        );
        let text = result.render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[1].starts_with("--"));
        assert!(lines[3].contains("grace"));
    }
}
