use std::collections::HashSet;

use calamine::Data;

use crate::models::CellValue;

const EMPTY_HEADER: &str = "__EMPTY";

/// Keeps the header text as-is. Blank headers become `__EMPTY`, and a name
/// already taken gets a `_1`, `_2`, ... suffix.
pub fn header_name(cell: &Data, existing_names: &mut HashSet<String>) -> String {
    let base_name = match cell {
        Data::Empty => EMPTY_HEADER.to_string(),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                text
            }
        }
    };

    let mut name = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(name.clone()) {
        name = format!("{}_{}", base_name, counter);
        counter += 1;
    }

    name
}

/// Date-times stay numeric (their serial value); error cells keep their
/// error code as text.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(d) => CellValue::Number(d.as_f64()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Null,
    }
}

pub fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

pub fn is_spreadsheet_type(file_type: &str) -> bool {
    let file_type = file_type.to_lowercase();
    ["xlsx", "xlsm", "xlsb", "xls", "ods", "spreadsheet", "excel"]
        .iter()
        .any(|ext| file_type.contains(ext))
}
