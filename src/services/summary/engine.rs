use std::time::Instant;

use crate::error::SummaryError;
use crate::models::{CellValue, Dataset};

use super::classifier::{self, ColumnKind};
use super::frequency::{self, FrequencyBreakdown};
use super::histogram::{self, HistogramBin, HISTOGRAM_BINS};
use super::uniqueness;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSummary {
    UniqueValues { count: usize },
    Histogram { bins: Vec<HistogramBin> },
    FrequencyBreakdown(FrequencyBreakdown),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReport {
    pub name: String,
    pub kind: ColumnKind,
    pub distinct_count: usize,
    pub summary: ColumnSummary,
}

/// Summarizes one column's values.
pub fn summarize_column(values: &[&CellValue]) -> (ColumnKind, usize, ColumnSummary) {
    let kind = classifier::classify(values);
    let uniqueness = uniqueness::detect(values);

    let summary = if uniqueness.is_fully_unique {
        ColumnSummary::UniqueValues { count: values.len() }
    } else {
        match kind {
            ColumnKind::Numeric => {
                let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_number()).collect();
                ColumnSummary::Histogram {
                    bins: histogram::build(&numbers, HISTOGRAM_BINS),
                }
            }
            ColumnKind::Categorical => {
                ColumnSummary::FrequencyBreakdown(frequency::summarize(values))
            }
        }
    };

    (kind, uniqueness.distinct_count, summary)
}

/// One report per column, in column order.
pub fn summarize_dataset(dataset: &Dataset) -> Result<Vec<ColumnReport>, SummaryError> {
    if dataset.columns().is_empty() {
        return Err(SummaryError::EmptyDataset);
    }

    let start = Instant::now();
    let reports: Vec<ColumnReport> = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values = dataset.column_values(idx);
            let (kind, distinct_count, summary) = summarize_column(&values);
            tracing::debug!(
                "Column '{}': {:?}, {} distinct of {}",
                name,
                kind,
                distinct_count,
                values.len()
            );
            ColumnReport {
                name: name.clone(),
                kind,
                distinct_count,
                summary,
            }
        })
        .collect();

    tracing::info!(
        "Summarized {} columns x {} rows in {:?}",
        dataset.column_count(),
        dataset.row_count(),
        start.elapsed()
    );

    Ok(reports)
}
