use crate::normalize::HEADER_SCAN_ROWS;
use crate::spreadsheet::criteria::Criteria;

/// Rows delivered per page when nothing else is configured.
pub const PAGE_SIZE: usize = 10;

/// Settings for loading a workbook and paging through results.
#[derive(Clone, Debug)]
pub struct Config {
    /// Which sheets take part and how error cells are read.
    pub criteria: Criteria,
    /// How many leading rows are searched for the column header.
    pub header_scan_rows: usize,
    /// Rows per page of a result view; 0 is treated as 1.
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            criteria: Criteria::default(),
            header_scan_rows: HEADER_SCAN_ROWS,
            page_size: PAGE_SIZE,
        }
    }
}
