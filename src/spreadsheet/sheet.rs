use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::record::RawRecord;
use crate::spreadsheet::record::RawValue;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Name given to header cells that are empty.
const EMPTY_HEADER: &str = "__EMPTY";

/// Represents one sheet of a workbook with all of its non-empty cells.
#[derive(Clone, Debug)]
pub struct Sheet {
    /// Sheet name
    pub(crate) name: String,
    /// All cells in the sheet, in reading order
    pub(crate) cells: Vec<Cell>,
    /// Actual data range (determined from cell data)
    pub(crate) row_upper_bound: Option<usize>,
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            cells: Vec::new(),
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Builds a sheet from an in-memory row-major grid.
    pub fn from_grid(name: &str, rows: Vec<Vec<RawValue>>) -> Self {
        let mut sheet = Sheet::new(name);
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                let (kind, value) = match value {
                    RawValue::Empty => continue,
                    RawValue::Text(text) => (CellType::InlineString, text),
                    RawValue::Number(number) => (CellType::Number, number.to_string()),
                    RawValue::Bool(flag) => (CellType::Boolean, if flag { "1" } else { "0" }.to_owned()),
                };
                sheet.push(Cell { row, col, kind, value });
            }
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell, widening the data range.
    pub(crate) fn push(&mut self, cell: Cell) {
        if self.row_upper_bound.map(|bound| bound < cell.row).unwrap_or(true) {
            self.row_upper_bound = Some(cell.row);
        }
        if self.col_upper_bound.map(|bound| bound < cell.col).unwrap_or(true) {
            self.col_upper_bound = Some(cell.col);
        }
        self.cells.push(cell);
    }

    /// Row-major grid from `A1` to the last used cell. Missing cells are [`RawValue::Empty`].
    pub fn grid(&self) -> Vec<Vec<RawValue>> {
        let (rows, cols) = match self.row_upper_bound.zip(self.col_upper_bound) {
            Some((row, col)) => (row + 1, col + 1),
            None => return Vec::new(),
        };
        let mut grid = vec![vec![RawValue::Empty; cols]; rows];
        for cell in &self.cells {
            grid[cell.row][cell.col] = cell.to_raw_value();
        }
        grid
    }

    /// The leading `limit` rows of [`Sheet::grid`], each cut after its own last used cell.
    pub fn head(&self, limit: usize) -> Vec<Vec<RawValue>> {
        let rows = self.sparse_rows(limit);
        let len = rows.keys().next_back().map(|row| row + 1).unwrap_or(0);
        let mut head = vec![Vec::new(); len];
        for (row, values) in rows {
            head[row] = values;
        }
        head
    }

    /// Returns true if any row below `row` holds a value.
    pub fn has_data_below(&self, row: usize) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.row > row && !cell.to_raw_value().is_blank())
    }

    /// Keyed records using row `header_row` as field names.
    ///
    /// Empty header cells are named `__EMPTY`, `__EMPTY_1`, ... and repeated names get a
    /// `_1`, `_2`, ... suffix. Rows below the header that hold no value are skipped.
    /// Columns right of the last header cell only appear in the rows that use them.
    pub fn records(&self, header_row: usize) -> Vec<RawRecord> {
        if self.row_upper_bound.map(|bound| bound < header_row).unwrap_or(true) {
            return Vec::new();
        }
        let mut rows = self.sparse_rows(usize::MAX);
        let header = Header::new(&rows.remove(&header_row).unwrap_or_default());
        rows.range(header_row + 1..)
            .map(|(_, values)| header.record(values))
            .filter(|record| !record.is_blank())
            .collect()
    }

    /// Used rows below `limit`, each holding the cells up to its own last used column.
    fn sparse_rows(&self, limit: usize) -> BTreeMap<usize, Vec<RawValue>> {
        let mut rows = BTreeMap::<usize, Vec<RawValue>>::new();
        for cell in self.cells.iter().filter(|cell| cell.row < limit) {
            let values = rows.entry(cell.row).or_default();
            if values.len() <= cell.col {
                values.resize(cell.col + 1, RawValue::Empty);
            }
            values[cell.col] = cell.to_raw_value();
        }
        rows
    }
}

/// Field names taken from a header row.
struct Header {
    names: Vec<String>,
    /// Empty cells in the header row, used to name the columns right of it
    empty_count: usize,
}

impl Header {
    fn new(cells: &[RawValue]) -> Self {
        Header {
            names: header_names(cells),
            empty_count: cells.iter().filter(|cell| cell.to_text().is_empty()).count(),
        }
    }

    fn name(&self, col: usize) -> String {
        match self.names.get(col) {
            Some(name) => name.to_owned(),
            None => match self.empty_count + (col - self.names.len()) {
                0 => EMPTY_HEADER.to_owned(),
                index => format!("{}_{}", EMPTY_HEADER, index),
            },
        }
    }

    /// Every header column, plus the used cells right of the header.
    fn record(&self, values: &[RawValue]) -> RawRecord {
        let mut record = RawRecord::new();
        for col in 0..self.names.len().max(values.len()) {
            let value = values.get(col).cloned().unwrap_or_default();
            if col < self.names.len() || !value.is_blank() {
                record.insert(self.name(col), value);
            }
        }
        record
    }
}

fn header_names(cells: &[RawValue]) -> Vec<String> {
    let mut seen = HashMap::<String, usize>::new();
    cells
        .iter()
        .map(|cell| {
            let text = cell.to_text();
            let base = if text.is_empty() { EMPTY_HEADER.to_owned() } else { text };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 { base } else { format!("{}_{}", base, count) };
            *count += 1;
            name
        })
        .collect()
}
