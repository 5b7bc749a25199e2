//! # Ingestion
//!
//! Picks the sheet holding the lab results, finds its real header row and
//! normalizes every record below it into a [`Dataset`].
use crate::config::Config;
use crate::error::TerpSheetError;
use crate::normalize::locate_header;
use crate::normalize::normalize;
use crate::normalize::Rejection;
use crate::schema::Row;
use crate::spreadsheet::open_spreadsheet;
use crate::spreadsheet::sheet::Sheet;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing::warn;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Workbook has no sheet to read")]
    NoSheets,

    #[error("Could not find header row (Product with Location, Room or Category) in the first {window} rows of sheet '{sheet}'")]
    HeaderNotFound { sheet: String, window: usize },

    #[error("{0}")]
    Workbook(#[from] TerpSheetError),
}

/// What happened while ingesting one workbook.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IngestReport {
    /// Sheet the rows were read from
    pub sheet: String,
    /// 0-based index of the header row within that sheet
    pub header_row: usize,
    /// Records without a product name
    pub missing_product: usize,
    /// Records whose product type matches no category
    pub unclassified_category: usize,
}

impl IngestReport {
    fn count(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::MissingProduct => self.missing_product += 1,
            Rejection::UnclassifiedCategory(_) => self.unclassified_category += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.missing_product + self.unclassified_category
    }
}

/// Rows of one successful ingestion, in sheet order.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    rows: Vec<Arc<Row>>,
    raw_count: usize,
    report: IngestReport,
}

impl Dataset {
    /// Wraps already normalized rows; `raw_count` is the number of records they came from.
    pub fn from_rows(rows: Vec<Row>, raw_count: usize) -> Self {
        Dataset {
            rows: rows.into_iter().map(Arc::new).collect(),
            raw_count,
            report: IngestReport::default(),
        }
    }

    pub fn rows(&self) -> &[Arc<Row>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records seen below the header, including rejected ones.
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }
}

/// Builds a dataset from the sheets of a workbook, in workbook order.
///
/// The first accepted sheet with any data under its first row is used, or the
/// first accepted sheet when none has. The header is searched in the first
/// `config.header_scan_rows` rows; records that do not normalize are counted
/// and dropped.
pub fn ingest(sheets: &[Sheet], config: &Config) -> Result<Dataset, IngestError> {
    let accepted: Vec<&Sheet> = sheets
        .iter()
        .filter(|sheet| config.criteria.accept(sheet.name()))
        .collect();
    let sheet = select_sheet(&accepted).ok_or(IngestError::NoSheets)?;
    debug!(sheet = sheet.name(), "Selected sheet");

    let header_row = match locate_header(&sheet.head(config.header_scan_rows), config.header_scan_rows) {
        Some(header_row) => header_row,
        None => {
            warn!(sheet = sheet.name(), window = config.header_scan_rows, "Header row not found");
            return Err(IngestError::HeaderNotFound {
                sheet: sheet.name().to_owned(),
                window: config.header_scan_rows,
            });
        }
    };

    let records = sheet.records(header_row);
    let mut report = IngestReport {
        sheet: sheet.name().to_owned(),
        header_row,
        ..IngestReport::default()
    };
    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        match normalize(record) {
            Ok(row) => rows.push(Arc::new(row)),
            Err(rejection) => report.count(&rejection),
        }
    }

    info!(
        sheet = %report.sheet,
        header_row,
        raw = records.len(),
        included = rows.len(),
        missing_product = report.missing_product,
        unclassified_category = report.unclassified_category,
        "Ingested lab results"
    );
    Ok(Dataset {
        rows,
        raw_count: records.len(),
        report,
    })
}

/// Opens workbook bytes, reads the accepted sheets and ingests them.
pub fn load_workbook(bytes: Vec<u8>, config: &Config) -> Result<Dataset, IngestError> {
    let mut spreadsheet = open_spreadsheet(bytes)?;
    let sheets = spreadsheet.read_sheets(&config.criteria)?;
    ingest(&sheets, config)
}

fn select_sheet<'a>(sheets: &[&'a Sheet]) -> Option<&'a Sheet> {
    let first = *sheets.first()?;
    for &sheet in sheets {
        if sheet.has_data_below(0) {
            return Some(sheet);
        }
        debug!(sheet = sheet.name(), "Skipping sheet without data");
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Category;
    use crate::spreadsheet::cell::Cell;
    use crate::spreadsheet::cell::CellType;
    use crate::spreadsheet::record::RawValue;

    fn row(cells: &[&str]) -> Vec<RawValue> {
        cells.iter().map(|cell| RawValue::from(*cell)).collect()
    }

    fn lab_sheet(name: &str) -> Sheet {
        Sheet::from_grid(name, vec![
            row(&["Quarterly Lab Report"]),
            row(&["Vendor: Example Labs"]),
            row(&[]),
            row(&["Product", "Location", "Category", "Room", "THC"]),
            row(&["OG Kush", "Downtown", "Flower", "A", "22.9%"]),
            row(&["", "Downtown", "Flower", "A", "19%"]),
            row(&["Gummies", "Downtown", "Edible", "B", "1%"]),
            row(&["Sauce Cart", "Uptown", "Sauce Cartridge", "C", "750 mg/g"]),
        ])
    }

    #[test]
    fn header_below_banner_rows() {
        let dataset = ingest(&[lab_sheet("Lab")], &Config::default()).unwrap();
        assert_eq!(dataset.raw_count(), 4);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].product(), "OG Kush");
        assert_eq!(dataset.rows()[1].category(), Category::Vape);
        assert_eq!(dataset.rows()[1].thc(), 75.0);

        let report = dataset.report();
        assert_eq!(report.sheet, "Lab");
        assert_eq!(report.header_row, 3);
        assert_eq!(report.missing_product, 1);
        assert_eq!(report.unclassified_category, 1);
        assert_eq!(report.rejected(), 2);
    }

    #[test]
    fn empty_sheets_are_skipped() {
        let sheets = vec![Sheet::from_grid("Cover", vec![row(&["Title only"])]), lab_sheet("Lab")];
        let dataset = ingest(&sheets, &Config::default()).unwrap();
        assert_eq!(dataset.report().sheet, "Lab");
    }

    #[test]
    fn falls_back_to_first_sheet() {
        let sheets = vec![
            Sheet::from_grid("Cover", vec![row(&["Title only"])]),
            Sheet::from_grid("Notes", vec![]),
        ];
        match ingest(&sheets, &Config::default()) {
            Err(IngestError::HeaderNotFound { sheet, window }) => {
                assert_eq!(sheet, "Cover");
                assert_eq!(window, 50);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn no_sheets() {
        assert!(matches!(ingest(&[], &Config::default()), Err(IngestError::NoSheets)));

        let mut config = Config::default();
        config.criteria = config.criteria.with_sheet_patterns(&["Results*"]).unwrap();
        assert!(matches!(ingest(&[lab_sheet("Lab")], &config), Err(IngestError::NoSheets)));
    }

    #[test]
    fn scan_window_is_configurable() {
        let config = Config {
            header_scan_rows: 3,
            ..Config::default()
        };
        assert!(matches!(
            ingest(&[lab_sheet("Lab")], &config),
            Err(IngestError::HeaderNotFound { window: 3, .. })
        ));
    }

    #[test]
    fn rows_keep_sheet_order() {
        let mut grid = vec![row(&["Product", "Category", "BetaCaryphyllene"])];
        for index in 0..5 {
            let product = format!("Strain {index}");
            grid.push(row(&[product.as_str(), "Flower", "0.5%"]));
        }
        let dataset = ingest(&[Sheet::from_grid("Lab", grid)], &Config::default()).unwrap();
        let products: Vec<&str> = dataset.rows().iter().map(|row| row.product()).collect();
        assert_eq!(products, vec!["Strain 0", "Strain 1", "Strain 2", "Strain 3", "Strain 4"]);
    }

    #[test]
    fn whitespace_rows_are_records() {
        let mut grid = lab_sheet("Lab").grid();
        grid.push(vec![RawValue::Empty, RawValue::from(" ")]);
        let dataset = ingest(&[Sheet::from_grid("Lab", grid)], &Config::default()).unwrap();
        assert_eq!(dataset.raw_count(), 5);
        assert_eq!(dataset.report().missing_product, 2);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn stray_far_cell() {
        let mut sheet = lab_sheet("Lab");
        sheet.push(Cell {
            row: 1_048_575,
            col: 16_383,
            kind: CellType::InlineString,
            value: "stray".to_owned(),
        });
        let dataset = ingest(&[sheet], &Config::default()).unwrap();
        assert_eq!(dataset.raw_count(), 5);
        assert_eq!(dataset.report().missing_product, 2);
        assert_eq!(dataset.len(), 2);
    }
}
