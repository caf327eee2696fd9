use serde::Serialize;

use crate::models::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// A column is numeric only when every value is a number. Nulls and the
/// empty column both count as categorical.
pub fn classify(values: &[&CellValue]) -> ColumnKind {
    if !values.is_empty() && values.iter().all(|v| v.is_number()) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_numbers_is_numeric() {
        let values = [CellValue::Number(1.0), CellValue::Number(-3.5)];
        let refs: Vec<_> = values.iter().collect();
        assert_eq!(classify(&refs), ColumnKind::Numeric);
    }

    #[test]
    fn single_null_forces_categorical() {
        let values = [CellValue::Number(1.0), CellValue::Null, CellValue::Number(2.0)];
        let refs: Vec<_> = values.iter().collect();
        assert_eq!(classify(&refs), ColumnKind::Categorical);
    }

    #[test]
    fn numeric_text_is_not_numeric() {
        let values = [CellValue::Text("1".into()), CellValue::Number(2.0)];
        let refs: Vec<_> = values.iter().collect();
        assert_eq!(classify(&refs), ColumnKind::Categorical);
    }

    #[test]
    fn empty_is_categorical() {
        assert_eq!(classify(&[]), ColumnKind::Categorical);
    }
}
