//! # Query Engine
//!
//! Filters a [`Dataset`] down to one category and an optional product search,
//! orders it and hands it out page by page through a [`ResultView`].
use crate::ingest::Dataset;
use crate::schema::Category;
use crate::schema::Column;
use crate::schema::ColumnValue;
use crate::schema::Row;
use crate::schema::Terpene;
use std::cmp::Ordering;
use tracing::debug;

pub mod view;

pub use view::Page;
pub use view::ResultView;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Direction used when a column is first chosen: numbers high to low, text A to Z.
    pub fn default_for(column: Column) -> Direction {
        if column.is_numeric() {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    pub fn flip(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// A user-chosen sort column and its direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: Direction,
}

impl SortState {
    pub fn new(column: Column) -> Self {
        SortState {
            column,
            direction: Direction::default_for(column),
        }
    }

    /// Choosing the active column again flips it; another column starts at its default direction.
    pub fn toggle(self, column: Column) -> SortState {
        if self.column == column {
            SortState {
                column,
                direction: self.direction.flip(),
            }
        } else {
            SortState::new(column)
        }
    }
}

/// What to show: one category, an optional product search and an optional sort.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuerySpec {
    pub category: Category,
    pub search_text: String,
    pub sort: Option<SortState>,
}

impl QuerySpec {
    pub fn new(category: Category) -> Self {
        QuerySpec {
            category,
            ..QuerySpec::default()
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Applies a click on a column header.
    pub fn sort_by(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(sort) => sort.toggle(column),
            None => SortState::new(column),
        });
    }

    /// Search text as matched: trimmed and lowercased.
    pub fn search(&self) -> String {
        self.search_text.trim().to_lowercase()
    }

    pub fn matches(&self, row: &Row) -> bool {
        let search = self.search();
        row.category() == self.category && (search.is_empty() || row.product().to_lowercase().contains(&search))
    }
}

/// Orders two rows: by the chosen sort when set, then by total terpenes
/// descending, then by beta-caryophyllene descending.
pub fn compare(a: &Row, b: &Row, sort: Option<SortState>) -> Ordering {
    let primary = match sort {
        Some(sort) => sort.direction.apply(compare_column(a, b, sort.column)),
        None => Ordering::Equal,
    };
    primary.then_with(|| default_order(a, b))
}

fn default_order(a: &Row, b: &Row) -> Ordering {
    b.total_terpenes()
        .total_cmp(&a.total_terpenes())
        .then_with(|| b.terpene(Terpene::BetaCaryphyllene).total_cmp(&a.terpene(Terpene::BetaCaryphyllene)))
}

fn compare_column(a: &Row, b: &Row, column: Column) -> Ordering {
    match (a.value(column), b.value(column)) {
        (ColumnValue::Number(a), ColumnValue::Number(b)) => a.total_cmp(&b),
        (ColumnValue::Text(a), ColumnValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        _ => Ordering::Equal,
    }
}

/// Runs a query against a dataset. Rows that tie on every key keep dataset order.
pub fn query(dataset: &Dataset, spec: &QuerySpec, page_size: usize) -> ResultView {
    let mut rows: Vec<_> = dataset
        .rows()
        .iter()
        .filter(|row| spec.matches(row))
        .cloned()
        .collect();
    rows.sort_by(|a, b| compare(a, b, spec.sort));
    debug!(category = %spec.category, search = %spec.search(), matched = rows.len(), "Recomputed result view");
    ResultView::new(rows, page_size)
}
