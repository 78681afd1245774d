//! Fully materialized tabular result sets.
//!
//! A [`Cursor`] owns its column names and every row; nothing is streamed and
//! nothing stays open once the provider call returns.

use super::error::ProviderError;
use anyhow::Result;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// Column values supplied to write operations. The provider ignores them.
pub type ContentValues = BTreeMap<String, Value>;

/// A single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Text(v) => serializer.serialize_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Cursor {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, values: Vec<Value>) -> Result<(), ProviderError> {
        if values.len() != self.columns.len() {
            return Err(ProviderError::ColumnMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_index_or_err(&self, name: &str) -> Result<usize, ProviderError> {
        self.column_index(name).ok_or_else(|| ProviderError::UnknownColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row(&self, index: usize) -> Option<&[Value]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    pub fn get_i64(&self, row: usize, column: &str) -> Option<i64> {
        self.get(row, column)?.as_i64()
    }

    pub fn get_string(&self, row: usize, column: &str) -> Option<&str> {
        self.get(row, column)?.as_str()
    }

    /// Returns a cursor restricted to `columns`, in the order given.
    pub fn project(&self, columns: &[&str]) -> Result<Cursor, ProviderError> {
        let indices = columns
            .iter()
            .map(|name| self.column_index_or_err(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut projected = Cursor::new(columns);
        for row in &self.rows {
            projected.add_row(indices.iter().map(|&i| row[i].clone()).collect())?;
        }
        Ok(projected)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, value)| (column.clone(), serde_json::to_value(value).unwrap_or_default()))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cursor {
        let mut cursor = Cursor::new(&["id", "name"]);
        cursor.add_row(vec![Value::from(7i64), Value::from("home")]).unwrap();
        cursor.add_row(vec![Value::from(-3i64), Value::from("work, late")]).unwrap();
        cursor
    }

    #[test]
    fn rejects_rows_of_the_wrong_width() {
        let mut cursor = Cursor::new(&["id", "name"]);
        let err = cursor.add_row(vec![Value::Null]).unwrap_err();
        assert!(matches!(err, ProviderError::ColumnMismatch { expected: 2, actual: 1 }));
        assert!(cursor.is_empty());
    }

    #[test]
    fn typed_getters() {
        let cursor = sample();
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.get_i64(0, "id"), Some(7));
        assert_eq!(cursor.get_string(1, "name"), Some("work, late"));
        assert_eq!(cursor.get_string(0, "id"), None);
        assert_eq!(cursor.get(2, "id"), None);
        assert_eq!(cursor.get(0, "missing"), None);
    }

    #[test]
    fn projection_reorders_and_validates() {
        let cursor = sample();
        let projected = cursor.project(&["name", "id"]).unwrap();
        assert_eq!(projected.columns(), ["name", "id"]);
        assert_eq!(projected.row(0).unwrap(), [Value::from("home"), Value::from(7i64)]);

        let err = cursor.project(&["name", "color"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown column: color");
    }

    #[test]
    fn csv_output_quotes_fields() {
        let mut out = Vec::new();
        sample().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "id,name\n7,home\n-3,\"work, late\"\n");
    }

    #[test]
    fn json_output_keeps_types() {
        let mut cursor = Cursor::new(&["n", "s"]);
        cursor.add_row(vec![Value::Null, Value::from(Some("x"))]).unwrap();
        let json = cursor.to_json();
        assert_eq!(json[0]["n"], serde_json::Value::Null);
        assert_eq!(json[0]["s"], "x");
        assert_eq!(sample().to_json()[1]["id"], -3);
    }
}
