//! # Board
//!
//! Owns the loaded dataset together with the current query and result view,
//! and recomputes the view whenever one of them changes.
use crate::config::Config;
use crate::ingest::load_workbook;
use crate::ingest::Dataset;
use crate::ingest::IngestError;
use crate::query::query;
use crate::query::Page;
use crate::query::QuerySpec;
use crate::query::ResultView;
use crate::schema::Category;
use crate::schema::Column;
use serde::Serialize;
use std::fmt::Display;
use tracing::warn;

/// Counts summarizing the board for a status line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Status {
    /// Records read below the header
    pub raw: usize,
    /// Records that became rows
    pub included: usize,
    /// Category being shown
    pub category: Category,
    /// Rows matching the current query
    pub rows: usize,
    /// Active search, trimmed and lowercased
    pub search: Option<String>,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "raw: {} • included: {} • showing: {} • rows: {}",
            self.raw, self.included, self.category, self.rows
        )?;
        if let Some(search) = &self.search {
            write!(f, " • search: \"{}\"", search)?;
        }
        Ok(())
    }
}

pub struct Board {
    config: Config,
    dataset: Option<Dataset>,
    spec: QuerySpec,
    view: ResultView,
}

impl Board {
    pub fn new(config: Config) -> Self {
        let view = ResultView::new(Vec::new(), config.page_size);
        Board {
            config,
            dataset: None,
            spec: QuerySpec::default(),
            view,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Ingests workbook bytes. On failure the board keeps its current dataset and view.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<&Dataset, IngestError> {
        match load_workbook(bytes, &self.config) {
            Ok(dataset) => Ok(self.install(dataset)),
            Err(error) => {
                warn!(%error, "Workbook load failed");
                Err(error)
            }
        }
    }

    /// Replaces the dataset and resets the query to Flower, no search, default order.
    pub fn install(&mut self, dataset: Dataset) -> &Dataset {
        self.spec = QuerySpec::default();
        let dataset = self.dataset.insert(dataset);
        self.view = query(dataset, &self.spec, self.config.page_size);
        dataset
    }

    pub fn select_category(&mut self, category: Category) {
        self.spec.category = category;
        self.recompute();
    }

    pub fn set_search(&mut self, search_text: &str) {
        self.spec.search_text = search_text.to_owned();
        self.recompute();
    }

    pub fn clear_search(&mut self) {
        self.spec.search_text.clear();
        self.recompute();
    }

    /// Sorts by a column, flipping the direction when it is already the sort column.
    pub fn sort_by(&mut self, column: Column) {
        self.spec.sort_by(column);
        self.recompute();
    }

    pub fn next_page(&mut self) -> Page {
        self.view.next_page()
    }

    /// `▲` or `▼` for the active sort column, `None` for every other column.
    pub fn sort_indicator(&self, column: Column) -> Option<&'static str> {
        self.spec
            .sort
            .filter(|sort| sort.column == column)
            .map(|sort| sort.direction.indicator())
    }

    pub fn status(&self) -> Status {
        let search = self.spec.search();
        Status {
            raw: self.dataset.as_ref().map(Dataset::raw_count).unwrap_or_default(),
            included: self.dataset.as_ref().map(Dataset::len).unwrap_or_default(),
            category: self.spec.category,
            rows: self.view.len(),
            search: (!search.is_empty()).then_some(search),
        }
    }

    fn recompute(&mut self) {
        self.view = match &self.dataset {
            Some(dataset) => query(dataset, &self.spec, self.config.page_size),
            None => ResultView::new(Vec::new(), self.config.page_size),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Direction;
    use crate::schema::Row;

    fn dataset() -> Dataset {
        let mut rows = Vec::new();
        for index in 0..25 {
            rows.extend(Row::new(&format!("Flower {index}"), Category::Flower));
        }
        rows.extend(Row::new("Kush Cart", Category::Vape).map(|row| row.with_thc(85.0)));
        rows.extend(Row::new("Kush Wax", Category::Concentrate));
        Dataset::from_rows(rows, 30)
    }

    fn board() -> Board {
        let mut board = Board::new(Config::default());
        board.install(dataset());
        board
    }

    #[test]
    fn starts_empty() {
        let board = Board::new(Config::default());
        assert!(board.dataset().is_none());
        assert_eq!(board.status().to_string(), "raw: 0 • included: 0 • showing: Flower • rows: 0");
    }

    #[test]
    fn status_line() {
        let mut board = board();
        assert_eq!(board.status().to_string(), "raw: 30 • included: 27 • showing: Flower • rows: 25");

        board.select_category(Category::Vape);
        board.set_search("  KUSH ");
        assert_eq!(
            board.status().to_string(),
            "raw: 30 • included: 27 • showing: Vape • rows: 1 • search: \"kush\""
        );

        board.clear_search();
        assert_eq!(board.status().search, None);
    }

    #[test]
    fn pages_reset_on_every_change() {
        let mut board = board();
        assert_eq!(board.next_page().rows.len(), 10);
        assert_eq!(board.next_page().rows.len(), 10);
        let last = board.next_page();
        assert_eq!((last.rows.len(), last.has_more), (5, false));
        assert!(board.next_page().rows.is_empty());

        board.sort_by(Column::Product);
        assert_eq!(board.view().rows_shown(), 0);
        assert_eq!(board.next_page().rows[0].product(), "Flower 0");
    }

    #[test]
    fn sort_indicator_follows_clicks() {
        let mut board = board();
        assert_eq!(board.sort_indicator(Column::Thc), None);

        board.sort_by(Column::Thc);
        assert_eq!(board.sort_indicator(Column::Thc), Some("▼"));
        assert_eq!(board.sort_indicator(Column::Product), None);

        board.sort_by(Column::Thc);
        assert_eq!(board.sort_indicator(Column::Thc), Some("▲"));
        assert_eq!(board.spec().sort.map(|sort| sort.direction), Some(Direction::Ascending));
    }

    #[test]
    fn install_resets_query() {
        let mut board = board();
        board.select_category(Category::Concentrate);
        board.set_search("wax");
        board.sort_by(Column::Room);

        board.install(dataset());
        assert_eq!(board.spec(), &QuerySpec::default());
        assert_eq!(board.view().len(), 25);
    }

    #[test]
    fn failed_load_keeps_dataset() {
        let mut board = board();
        board.select_category(Category::Vape);
        assert!(board.load(b"not a workbook".to_vec()).is_err());
        assert_eq!(board.dataset().map(Dataset::len), Some(27));
        assert_eq!(board.spec().category, Category::Vape);
        assert_eq!(board.view().len(), 1);
    }
}
