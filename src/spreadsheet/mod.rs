//! # Workbook Reading
//!
//! Opens an in-memory workbook and exposes its sheets as grids of raw cells or as
//! keyed records. Office Open XML (`.xlsx`, `.xlsm`) and OpenDocument (`.ods`)
//! workbooks are supported; the format is detected from the archive contents.
use crate::error::ResultMessage;
use crate::error::TerpSheetError;
use crate::helpers::zip::ZipHelper;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::ods::OdsSpreadsheet;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

pub(crate) mod cell;
pub mod criteria;
pub(crate) mod ods;
pub mod record;
pub mod reference;
pub mod sheet;
pub(crate) mod xlsx;

pub use ods::OdsError;

/// Reader over the workbook bytes.
pub(crate) type WorkbookReader = Cursor<Vec<u8>>;

#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Unrecognized workbook format")]
    UnknownFormat,

    #[error("Missing workbook part '{0}'")]
    FileError(String),

    #[error("Workbook has no sheets")]
    SpreadsheetEmptyError,

    #[error("Workbook is password protected")]
    SpreadsheetPasswordProtectedError,

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Sheet '{0}' cell {1} holds error value '{2}'")]
    CellValueError(String, String, String),
}

/// A workbook that can list its sheets and materialize them.
pub trait Spreadsheet {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads every cell of one sheet.
    fn read_sheet(&mut self, name: &str, criteria: &Criteria) -> Result<Sheet, TerpSheetError>;

    /// Reads the sheets accepted by `criteria`, in workbook order.
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, TerpSheetError> {
        self.sheet_names()
            .iter()
            .filter(|name| criteria.accept(name))
            .map(|name| self.read_sheet(name, criteria).with_prefix(&format!("Sheet '{}'", name)))
            .collect()
    }
}

/// Opens a workbook from its bytes, picking the reader from the archive layout.
pub fn open_spreadsheet(bytes: Vec<u8>) -> Result<Box<dyn Spreadsheet>, TerpSheetError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    if ods::is_ods(&mut zip)? {
        debug!("Opening OpenDocument workbook");
        Ok(Box::new(OdsSpreadsheet::open(zip)?))
    } else if zip.contains("xl/workbook.xml") {
        debug!("Opening Office Open XML workbook");
        Ok(Box::new(XlsxSpreadsheet::open(zip)?))
    } else {
        Err(SpreadsheetError::UnknownFormat)?
    }
}
