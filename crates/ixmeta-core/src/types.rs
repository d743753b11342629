//! Row and value types shared by every catalog query

use serde::{Deserialize, Serialize};

/// A single cell as returned by a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    /// Unsigned 64-bit integer (MySQL reports `SEQ_IN_INDEX` as unsigned)
    UInt64(u64),
    Float64(f64),
    /// Decimal/Numeric (stored as string for precision)
    Decimal(String),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text of a `String` cell, or of a `Bytes` cell holding valid UTF-8.
    ///
    /// MySQL drivers return `information_schema` text as binary strings.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Widen any integer cell to `i64`.
    ///
    /// Numeric text and decimals without a fractional part are accepted too,
    /// since several drivers hand back catalog counters as strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            Value::Decimal(s) => s.trim().parse::<i64>().ok(),
            Value::String(_) | Value::Bytes(_) => self.as_text()?.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Short type label used in decode error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int8(_) => "int8",
            Value::Int16(_) => "int16",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::UInt64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

/// A row from a query result
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
    columns: Vec<String>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result-set column metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ColumnMeta {
    #[serde(default)]
    pub name: String,
    /// Database-specific type name
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
    /// 0-based position in the result set
    #[serde(default)]
    pub ordinal: usize,
}

/// A fully materialized query result
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a result from column names and row values
    pub fn from_rows(columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let meta = names
            .iter()
            .enumerate()
            .map(|(ordinal, name)| ColumnMeta {
                name: name.clone(),
                ordinal,
                ..Default::default()
            })
            .collect();
        let rows = rows
            .into_iter()
            .map(|values| Row::new(names.clone(), values))
            .collect();
        Self {
            columns: meta,
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_i64_widens_integer_cells() {
        assert_eq!(Value::Int8(3).as_i64(), Some(3));
        assert_eq!(Value::Int16(-4).as_i64(), Some(-4));
        assert_eq!(Value::UInt64(7).as_i64(), Some(7));
        assert_eq!(Value::UInt64(u64::MAX).as_i64(), None);
    }

    #[test]
    fn test_as_i64_parses_numeric_text() {
        assert_eq!(Value::String(" 12 ".into()).as_i64(), Some(12));
        assert_eq!(Value::Decimal("2".into()).as_i64(), Some(2));
        assert_eq!(Value::String("two".into()).as_i64(), None);
        assert_eq!(Value::Float64(1.0).as_i64(), None);
    }

    #[test]
    fn test_as_text_accepts_utf8_bytes() {
        assert_eq!(Value::from("idx_a").as_text(), Some("idx_a"));
        assert_eq!(Value::Bytes(b"shop".to_vec()).as_text(), Some("shop"));
        assert_eq!(Value::Bytes(vec![0xff, 0xfe]).as_text(), None);
        assert_eq!(Value::Int32(1).as_text(), None);
        assert_eq!(Value::Bytes(b"3".to_vec()).as_i64(), Some(3));
    }

    #[test]
    fn test_from_rows_names_every_row() {
        let result = QueryResult::from_rows(
            &["INDEX_NAME", "column_name"],
            vec![vec!["idx_a".into(), "a".into()]],
        );
        let row = &result.rows[0];
        assert_eq!(row.columns(), ["INDEX_NAME", "column_name"]);
        assert_eq!(row.get(1), Some(&Value::from("a")));
        assert_eq!(row.len(), 2);
        assert_eq!(result.column_count(), 2);
        assert_eq!(result.columns[1].ordinal, 1);
    }
}
