use std::ops::Range;

/// Page position over a row sequence. The index is kept inside
/// `[0, page_count - 1]` by every navigation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page_index: usize,
    page_size: usize,
}

/// What a renderer needs to draw one page and its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub current_page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub rows: Range<usize>,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

/// `ceil(total_rows / page_size)`, never less than one page.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    ((total_rows + page_size - 1) / page_size).max(1)
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next(&mut self, total_rows: usize) {
        let last = page_count(total_rows, self.page_size) - 1;
        self.current_page_index = (self.current_page_index + 1).min(last);
    }

    pub fn previous(&mut self) {
        self.current_page_index = self.current_page_index.saturating_sub(1);
    }

    pub fn go_to(&mut self, index: usize, total_rows: usize) {
        let last = page_count(total_rows, self.page_size) - 1;
        self.current_page_index = index.min(last);
    }

    /// Row range of the current page; empty if the index is past the data.
    pub fn visible_range(&self, total_rows: usize) -> Range<usize> {
        let start = (self.current_page_index * self.page_size).min(total_rows);
        let end = (start + self.page_size).min(total_rows);
        start..end
    }

    pub fn window(&self, total_rows: usize) -> PageWindow {
        let page_count = page_count(total_rows, self.page_size);
        PageWindow {
            current_page_index: self.current_page_index,
            page_count,
            page_size: self.page_size,
            rows: self.visible_range(total_rows),
            is_first_page: self.current_page_index == 0,
            is_last_page: self.current_page_index == page_count - 1,
        }
    }
}
