use std::collections::HashSet;

use crate::models::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uniqueness {
    pub distinct_count: usize,
    pub is_fully_unique: bool,
}

pub fn detect(values: &[&CellValue]) -> Uniqueness {
    let distinct_count = values
        .iter()
        .map(|v| v.key())
        .collect::<HashSet<_>>()
        .len();

    Uniqueness {
        distinct_count,
        is_fully_unique: distinct_count == values.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_owned(values: &[CellValue]) -> Uniqueness {
        let refs: Vec<_> = values.iter().collect();
        detect(&refs)
    }

    #[test]
    fn empty_is_fully_unique() {
        assert_eq!(
            detect(&[]),
            Uniqueness { distinct_count: 0, is_fully_unique: true }
        );
    }

    #[test]
    fn repeated_value_is_not_unique() {
        let u = detect_owned(&[
            CellValue::Text("a".into()),
            CellValue::Text("b".into()),
            CellValue::Text("a".into()),
        ]);
        assert_eq!(u.distinct_count, 2);
        assert!(!u.is_fully_unique);
    }

    #[test]
    fn nulls_collapse_into_one_value() {
        let u = detect_owned(&[CellValue::Null, CellValue::Null, CellValue::Number(1.0)]);
        assert_eq!(u.distinct_count, 2);
        assert!(!u.is_fully_unique);
    }

    #[test]
    fn mixed_types_stay_distinct() {
        let u = detect_owned(&[
            CellValue::Number(1.0),
            CellValue::Text("1".into()),
            CellValue::Boolean(true),
            CellValue::Null,
        ]);
        assert!(u.is_fully_unique);
        assert_eq!(u.distinct_count, 4);
    }
}
