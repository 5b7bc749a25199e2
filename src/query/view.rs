use crate::config::PAGE_SIZE;
use crate::schema::Row;
use std::sync::Arc;

/// One batch of rows handed out by [`ResultView::next_page`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub rows: Vec<Arc<Row>>,
    /// True while the view holds rows not delivered yet.
    pub has_more: bool,
}

/// Filtered and ordered rows with a forward-only page cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    rows: Vec<Arc<Row>>,
    page_size: usize,
    rows_shown: usize,
}

impl Default for ResultView {
    fn default() -> Self {
        ResultView::new(Vec::new(), PAGE_SIZE)
    }
}

impl ResultView {
    /// Wraps ordered rows; a page size of 0 is raised to 1.
    pub fn new(rows: Vec<Arc<Row>>, page_size: usize) -> Self {
        ResultView {
            rows,
            page_size: page_size.max(1),
            rows_shown: 0,
        }
    }

    /// Every matching row in order, delivered or not.
    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn rows_shown(&self) -> usize {
        self.rows_shown
    }

    pub fn has_more(&self) -> bool {
        self.rows_shown < self.rows.len()
    }

    /// Rows delivered so far.
    pub fn visible(&self) -> &[Arc<Row>] {
        &self.rows[..self.rows_shown]
    }

    /// Delivers the next page and advances the cursor.
    /// Past the end this returns an empty page and leaves the cursor alone.
    pub fn next_page(&mut self) -> Page {
        let start = self.rows_shown;
        let end = start.saturating_add(self.page_size).min(self.rows.len());
        self.rows_shown = end;
        Page {
            rows: self.rows[start..end].to_vec(),
            has_more: self.has_more(),
        }
    }
}
