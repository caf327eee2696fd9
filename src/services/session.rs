use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::pagination::{PageState, PageWindow};
use super::summary::{summarize_dataset, ColumnReport};
use crate::error::{AppError, SummaryError};
use crate::models::Dataset;

/// The loaded sheet: its rows, their column summaries and the page being viewed.
#[derive(Debug)]
pub struct SheetSession {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub dataset: Dataset,
    pub columns: Vec<ColumnReport>,
    pub page: PageState,
}

impl SheetSession {
    /// Summarizes `dataset`; the page starts at index 0.
    pub fn build(
        source: impl Into<String>,
        dataset: Dataset,
        page_size: usize,
    ) -> Result<Self, SummaryError> {
        let columns = summarize_dataset(&dataset)?;
        Ok(Self {
            source: source.into(),
            loaded_at: Utc::now(),
            dataset,
            columns,
            page: PageState::new(page_size),
        })
    }

    pub fn window(&self) -> PageWindow {
        self.page.window(self.dataset.row_count())
    }

    pub fn visible_rows(&self) -> Vec<serde_json::Value> {
        self.window()
            .rows
            .map(|idx| self.dataset.row_json(idx))
            .collect()
    }

    pub fn next_page(&mut self) {
        self.page.next(self.dataset.row_count());
    }

    pub fn previous_page(&mut self) {
        self.page.previous();
    }

    pub fn go_to_page(&mut self, index: usize) {
        self.page.go_to(index, self.dataset.row_count());
    }
}

/// Holds at most one session; a new load replaces the old one wholesale.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<SheetSession>>,
}

impl SessionStore {
    pub fn replace(&self, session: SheetSession) {
        let action = if self.is_loaded() { "Replacing" } else { "Starting" };
        tracing::info!(
            "{} sheet session with '{}' ({} rows, {} columns)",
            action,
            session.source,
            session.dataset.row_count(),
            session.dataset.column_count()
        );
        *self.current.write() = Some(session);
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn read<T>(&self, f: impl FnOnce(&SheetSession) -> T) -> Result<T, AppError> {
        self.current.read().as_ref().map(f).ok_or(AppError::NotLoaded)
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut SheetSession) -> T) -> Result<T, AppError> {
        self.current.write().as_mut().map(f).ok_or(AppError::NotLoaded)
    }
}
