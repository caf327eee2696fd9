use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SummaryError;
use crate::models::{CellValue, Dataset, RowIssue};

/// Pre-decoded rows, e.g. the JSON a browser-side spreadsheet parser emits.
#[derive(Debug, Deserialize)]
pub struct RowsPayload {
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    pub rows: Vec<Map<String, Value>>,
}

/// Without an explicit column list, the key order of the first row decides
/// the columns. Arrays and objects are kept as their JSON text and reported
/// as row issues. A column list naming the same column twice is rejected.
pub fn ingest(payload: RowsPayload) -> Result<Dataset, SummaryError> {
    let columns = match payload.columns {
        Some(columns) => columns,
        None => payload
            .rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default(),
    };

    if columns.is_empty() {
        return Err(SummaryError::EmptyDataset);
    }

    let mut seen = HashSet::new();
    if let Some(name) = columns.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(SummaryError::DuplicateColumn { name: name.clone() });
    }

    let mut issues = Vec::new();
    let rows: Vec<Vec<CellValue>> = payload
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, record)| {
            columns
                .iter()
                .map(|name| match record.get(name) {
                    Some(value) => json_cell(value).unwrap_or_else(|| {
                        issues.push(RowIssue { row: row_idx, column: name.clone() });
                        CellValue::Text(value.to_string())
                    }),
                    None => CellValue::Null,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    for issue in &issues {
        let err = SummaryError::MalformedRow { row: issue.row, column: issue.column.clone() };
        tracing::warn!("{}", err);
    }

    Ok(Dataset::new(columns, rows).with_issues(issues))
}

fn json_cell(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Null),
        Value::Bool(b) => Some(CellValue::Boolean(*b)),
        Value::Number(n) => n.as_f64().map(CellValue::Number),
        Value::String(s) => Some(CellValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}
