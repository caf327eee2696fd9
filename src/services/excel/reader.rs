use std::collections::HashSet;
use std::io::Cursor;
use std::time::Instant;

use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use super::utils::{cell_value, header_name, is_blank_row};
use crate::error::AppError;
use crate::models::{CellValue, Dataset};

/// Decodes the first sheet of a workbook into a [`Dataset`].
pub struct WorkbookReader {
    max_file_size: usize,
}

impl WorkbookReader {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    pub fn read_bytes(&self, file_data: Bytes) -> Result<Dataset, AppError> {
        if file_data.len() > self.max_file_size {
            return Err(AppError::FileTooLarge {
                size: file_data.len(),
                max: self.max_file_size,
            });
        }

        let start = Instant::now();
        tracing::info!("Opening workbook ({}KB)", file_data.len() / 1024);

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(file_data)).map_err(|e| {
            tracing::error!("Failed to open workbook: {}", e);
            AppError::FileProcessingError(format!("Failed to open workbook: {}", e))
        })?;

        let sheet_names = workbook.sheet_names();
        let first = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| {
                AppError::FileProcessingError("No sheets found in workbook".to_string())
            })?;
        if sheet_names.len() > 1 {
            tracing::debug!("Workbook has {} sheets, reading '{}' only", sheet_names.len(), first);
        }

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::FileProcessingError("Failed to read worksheet".to_string()))??;

        let dataset = dataset_from_range(&range);
        tracing::info!(
            "Sheet '{}' decoded: {} rows x {} columns in {:?}",
            first,
            dataset.row_count(),
            dataset.column_count(),
            start.elapsed()
        );

        Ok(dataset)
    }
}

/// The first non-blank row names the columns; blank rows after it are
/// dropped.
pub fn dataset_from_range(range: &Range<Data>) -> Dataset {
    let mut rows = range.rows().skip_while(|row| is_blank_row(row));

    let mut existing_names = HashSet::new();
    let headers: Vec<String> = rows
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| header_name(cell, &mut existing_names))
                .collect()
        })
        .unwrap_or_default();

    let data: Vec<Vec<CellValue>> = rows
        .filter(|row| !is_blank_row(row))
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .collect();

    Dataset::new(headers, data)
}
