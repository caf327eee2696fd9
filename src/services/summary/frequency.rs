use std::collections::HashMap;

use smallvec::SmallVec;

use crate::models::CellValue;

pub const TOP_ENTRIES: usize = 2;
pub const LABEL_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    pub value: CellValue,
    pub percentage: f64,
}

impl FrequencyEntry {
    /// Display form of the value, cut to 20 characters.
    pub fn label(&self) -> String {
        self.value.to_string().chars().take(LABEL_MAX_CHARS).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyBreakdown {
    pub top: SmallVec<[FrequencyEntry; TOP_ENTRIES]>,
    pub other_percentage: f64,
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// Ranks distinct values by share of the column. Ties keep first-occurrence
/// order. Everything past the top two is folded into `other_percentage`.
pub fn summarize(values: &[&CellValue]) -> FrequencyBreakdown {
    let total = values.len();
    if total == 0 {
        return FrequencyBreakdown { top: SmallVec::new(), other_percentage: 0.0 };
    }

    let mut index = HashMap::new();
    let mut tallies: Vec<(&CellValue, usize)> = Vec::new();
    for &value in values {
        let slot = *index.entry(value.key()).or_insert_with(|| {
            tallies.push((value, 0));
            tallies.len() - 1
        });
        tallies[slot].1 += 1;
    }

    // stable: equal counts keep first-occurrence order
    tallies.sort_by(|a, b| b.1.cmp(&a.1));

    let percentage = |count: usize| 100.0 * count as f64 / total as f64;

    let top = tallies
        .iter()
        .take(TOP_ENTRIES)
        .map(|&(value, count)| FrequencyEntry {
            value: value.clone(),
            percentage: percentage(count),
        })
        .collect();

    let other_percentage = tallies
        .iter()
        .skip(TOP_ENTRIES)
        .map(|&(_, count)| percentage(count))
        .sum();

    FrequencyBreakdown { top, other_percentage }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|s| CellValue::Text(s.to_string())).collect()
    }

    fn run(values: &[CellValue]) -> FrequencyBreakdown {
        let refs: Vec<_> = values.iter().collect();
        summarize(&refs)
    }

    #[test]
    fn top_two_and_other() {
        let breakdown = run(&text(&["a", "a", "a", "b", "c"]));

        assert_eq!(breakdown.top.len(), 2);
        assert_eq!(breakdown.top[0].value, CellValue::Text("a".into()));
        assert!((breakdown.top[0].percentage - 60.0).abs() < 1e-9);
        assert_eq!(breakdown.top[1].value, CellValue::Text("b".into()));
        assert!((breakdown.top[1].percentage - 20.0).abs() < 1e-9);
        assert!((breakdown.other_percentage - 20.0).abs() < 1e-9);
        assert_eq!(format_percentage(breakdown.other_percentage), "20.00%");
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let breakdown = run(&text(&["x", "y", "z", "y", "x", "z"]));
        let labels: Vec<_> = breakdown.top.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["x", "y"]);
    }

    #[test]
    fn two_distinct_values_have_no_other() {
        let breakdown = run(&text(&["a", "b", "b", "a", "a"]));
        assert_eq!(breakdown.top.len(), 2);
        assert_eq!(breakdown.other_percentage, 0.0);
    }

    #[test]
    fn shares_sum_to_hundred() {
        let breakdown = run(&text(&["a", "b", "c", "d", "a", "b", "e", "f", "g"]));
        let sum: f64 = breakdown.top.iter().map(|e| e.percentage).sum::<f64>()
            + breakdown.other_percentage;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn nulls_are_counted() {
        let values = vec![
            CellValue::Null,
            CellValue::Null,
            CellValue::Number(1.0),
            CellValue::Number(1.0),
            CellValue::Number(1.0),
        ];
        let breakdown = run(&values);
        assert_eq!(breakdown.top[0].value, CellValue::Number(1.0));
        assert_eq!(breakdown.top[1].value, CellValue::Null);
    }

    #[test]
    fn label_is_truncated_but_value_is_not() {
        let long = "abcdefghijklmnopqrstuvwxyz";
        let breakdown = run(&text(&[long, long, "short"]));
        assert_eq!(breakdown.top[0].label(), "abcdefghijklmnopqrst");
        assert_eq!(breakdown.top[0].value, CellValue::Text(long.into()));
    }
}
