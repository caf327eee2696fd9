use std::fmt;

use serde::Serialize;

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// Grouping key with same-value-zero semantics: `-0.0` equals `0.0` and
    /// every NaN is the same value.
    pub fn key(&self) -> ValueKey<'_> {
        match self {
            CellValue::Number(n) if n.is_nan() => ValueKey::Number(f64::NAN.to_bits()),
            CellValue::Number(n) if *n == 0.0 => ValueKey::Number(0f64.to_bits()),
            CellValue::Number(n) => ValueKey::Number(n.to_bits()),
            CellValue::Text(s) => ValueKey::Text(s),
            CellValue::Boolean(b) => ValueKey::Boolean(*b),
            CellValue::Null => ValueKey::Null,
        }
    }

    /// Whole numbers in i64 range are emitted as JSON integers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serde_json::Value::Number((*n as i64).into())
            }
            CellValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Boolean(b) => serde_json::Value::Bool(*b),
            CellValue::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Null => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Number(u64),
    Text(&'a str),
    Boolean(bool),
    Null,
}

/// A non-scalar value met while ingesting row records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIssue {
    pub row: usize,
    pub column: String,
}

/// Column names plus rows stored positionally against those names.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    issues: Vec<RowIssue>,
}

impl Dataset {
    /// Rows shorter than the column list are padded with `Null`, longer ones
    /// are cut.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();

        Self {
            columns,
            rows,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<RowIssue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn issues(&self) -> &[RowIssue] {
        &self.issues
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of one column across every row, in row order.
    pub fn column_values(&self, idx: usize) -> Vec<&CellValue> {
        self.rows.iter().map(|row| &row[idx]).collect()
    }

    /// A row as a JSON object keyed by column name, in column order.
    pub fn row_json(&self, idx: usize) -> serde_json::Value {
        let object = self
            .columns
            .iter()
            .zip(&self.rows[idx])
            .map(|(name, cell)| (name.clone(), cell.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }
}
