use crate::error::TerpSheetError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::criteria::Criteria;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use crate::spreadsheet::WorkbookReader;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::io::Read;
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

/// ODS file MIME type identifier
const MIME_TYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";
/// Prefix shared by every OpenDocument MIME type
const MIME_TYPE_FAMILY: &str = "application/vnd.oasis.opendocument";
/// Upper bound on materialized copies of one repeated cell, across both axes
const MAX_REPEAT: usize = 1 << 16;
/// Largest sheet an office suite writes: 1048576 rows by 16384 columns
const MAX_ROWS: usize = 1 << 20;
const MAX_COLS: usize = 1 << 14;

const TABLE: QName = QName(b"table:table");
const TABLE_ROW: QName = QName(b"table:table-row");
const TABLE_CELL: QName = QName(b"table:table-cell");
/// Cell hidden under a merged cell
const TABLE_COVERED_CELL: QName = QName(b"table:covered-table-cell");
/// Cell comment, never part of the value
const ANNOTATION: QName = QName(b"office:annotation");
const PARAGRAPH: QName = QName(b"text:p");
/// Run of `text:c` spaces
const SPACE: QName = QName(b"text:s");
const TAB: QName = QName(b"text:tab");
const LINE_BREAK: QName = QName(b"text:line-break");

#[derive(Error, Debug)]
pub enum OdsError {
    #[error("Not an OpenDocument spreadsheet: '{0}'")]
    MimeTypeError(String),
}

/// OpenDocument spreadsheet held in memory
pub(crate) struct OdsSpreadsheet {
    zip: ZipArchive<WorkbookReader>,
    sheet_names: Vec<String>,
}

impl OdsSpreadsheet {
    /// Validates the archive and lists the tables of `content.xml`.
    pub(crate) fn open(mut zip: ZipArchive<WorkbookReader>) -> Result<Self, TerpSheetError> {
        if let Some(mime) = read_mime(&mut zip)? {
            if mime != MIME_TYPE {
                Err(OdsError::MimeTypeError(mime))?;
            }
        }
        if is_password_protected(&mut zip)? {
            Err(SpreadsheetError::SpreadsheetPasswordProtectedError)?;
        }
        let sheet_names = load_sheet_names(&mut zip)?;
        if sheet_names.is_empty() {
            Err(SpreadsheetError::SpreadsheetEmptyError)?;
        }
        debug!(sheets = sheet_names.len(), "Loaded ods workbook");
        Ok(OdsSpreadsheet { zip, sheet_names })
    }

    /// Parses `content.xml` once, materializing the tables whose name passes `wanted`.
    fn read_tables<F>(&mut self, criteria: &Criteria, wanted: F) -> Result<Vec<Sheet>, TerpSheetError>
    where
        F: Fn(&str) -> bool,
    {
        let mut sheets = Vec::<Sheet>::new();
        let mut reader = self.zip
            .xml_reader("content.xml")?
            .ok_or_else(|| SpreadsheetError::FileError("content.xml".to_owned()))?;

        let mut sheet = None::<Sheet>;
        let mut row = 0usize;
        let mut col = 0usize;
        let mut row_count = 1usize;
        let mut col_count = 1usize;
        let mut kind = CellType::default();
        let mut value = String::new();
        let mut text_context = false;
        let mut comment_context = false;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TABLE => {
                let name = event.get_attribute_value("table:name")?.unwrap_or_default().to_string();
                sheet = wanted(&name).then(|| Sheet::new(&name));
                row = 0;
            }
            Event::End(event) if event.name() == TABLE => {
                if let Some(sheet) = sheet.take() {
                    sheets.push(sheet);
                }
            }
            Event::Start(event) if sheet.is_some() && event.name() == TABLE_ROW => {
                row_count = event.parse_attribute_value("table:number-rows-repeated")?.unwrap_or(1);
                col = 0;
            }
            Event::End(event) if sheet.is_some() && event.name() == TABLE_ROW => {
                row = row.saturating_add(row_count);
            }
            Event::Start(event) if sheet.is_some() && (event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL) => {
                value.clear();
                text_context = false;
                comment_context = false;
                col_count = event.parse_attribute_value("table:number-columns-repeated")?.unwrap_or(1);
                kind = match event.get_attribute_value("office:value-type")?.as_deref() {
                    Some("boolean") => {
                        let flag = event.get_attribute_value("office:boolean-value")?
                            .map(|data| data != "false" && data != "0")
                            .unwrap_or(false);
                        value.push_str(if flag { "1" } else { "0" });
                        CellType::Boolean
                    }
                    Some("date") => {
                        if let Some(data) = event.get_attribute_value("office:date-value")? {
                            value.push_str(&data);
                        }
                        CellType::IsoDateTime
                    }
                    Some("time") => {
                        if let Some(data) = event.get_attribute_value("office:time-value")? {
                            value.push_str(&data);
                        }
                        CellType::IsoDuration
                    }
                    Some("string") => {
                        if let Some(data) = event.get_attribute_value("office:string-value")? {
                            value.push_str(&data);
                        } else {
                            text_context = true;
                        }
                        let is_error = event.get_attribute_value("calcext:value-type")?
                            .map(|data| data == "error")
                            .unwrap_or(false);
                        if is_error { CellType::Error } else { CellType::InlineString }
                    }
                    Some(_) => {
                        if let Some(data) = event.get_attribute_value("office:value")? {
                            value.push_str(&data);
                        }
                        CellType::Number
                    }
                    None => CellType::Empty,
                };
            }
            Event::End(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                if let Some(sheet) = sheet.as_mut() {
                    match kind {
                        _ if value.is_empty() => (),
                        CellType::Empty => (),
                        _ if row >= MAX_ROWS || col >= MAX_COLS => {
                            debug!(sheet = %sheet.name, row, col, "Skipping cell outside the sheet limits");
                        }
                        CellType::Error if criteria.error_as_null => {
                            debug!(sheet = %sheet.name, cell = %index_to_reference(row, col), "Reading error cell as empty");
                        }
                        CellType::Error => Err(SpreadsheetError::CellValueError(
                            sheet.name.to_owned(),
                            index_to_reference(row, col),
                            value.to_owned(),
                        ))?,
                        _ => {
                            let rows = row_count.min(MAX_ROWS - row).min(MAX_REPEAT);
                            let cols = col_count.min(MAX_COLS - col).min(MAX_REPEAT / rows.max(1));
                            for row_offset in 0..rows {
                                for col_offset in 0..cols {
                                    sheet.push(Cell {
                                        row: row + row_offset,
                                        col: col + col_offset,
                                        kind,
                                        value: value.to_owned(),
                                    });
                                }
                            }
                        }
                    }
                }
                col = col.saturating_add(col_count);
                text_context = false;
                comment_context = false;
            }
            Event::Start(event) if text_context && event.name() == ANNOTATION => comment_context = true,
            Event::End(event) if text_context && event.name() == ANNOTATION => comment_context = false,
            Event::Start(event) if text_context && !comment_context && event.name() == PARAGRAPH => {
                if !value.is_empty() {
                    value.push('\n');
                }
            }
            Event::Start(event) if text_context && !comment_context && event.name() == SPACE => {
                let count = event.parse_attribute_value("text:c")?.unwrap_or(1usize);
                value.extend(std::iter::repeat(' ').take(count));
            }
            Event::Start(event) if text_context && !comment_context && event.name() == TAB => value.push('\t'),
            Event::Start(event) if text_context && !comment_context && event.name() == LINE_BREAK => value.push('\n'),
            Event::Text(event) if text_context && !comment_context => value.push_bytes_text(&event)?,
            Event::GeneralRef(event) if text_context && !comment_context => value.push_bytes_ref(&event)?,
        });
        Ok(sheets)
    }
}

impl Spreadsheet for OdsSpreadsheet {
    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.clone()
    }

    fn read_sheet(&mut self, name: &str, criteria: &Criteria) -> Result<Sheet, TerpSheetError> {
        self.read_tables(criteria, |table| table == name)?
            .into_iter()
            .next()
            .ok_or_else(|| SpreadsheetError::SheetNotFound(name.to_owned()).into())
    }

    /// All accepted tables come out of a single pass over `content.xml`.
    fn read_sheets(&mut self, criteria: &Criteria) -> Result<Vec<Sheet>, TerpSheetError> {
        self.read_tables(criteria, |table| criteria.accept(table))
    }
}

/// Returns true if the archive looks like an OpenDocument file.
pub(crate) fn is_ods(zip: &mut ZipArchive<WorkbookReader>) -> Result<bool, TerpSheetError> {
    if let Some(mime) = read_mime(zip)? {
        return Ok(mime.starts_with(MIME_TYPE_FAMILY));
    }
    Ok(zip.contains("content.xml") && !zip.contains("xl/workbook.xml"))
}

fn read_mime(zip: &mut ZipArchive<WorkbookReader>) -> Result<Option<String>, TerpSheetError> {
    match zip.file("mimetype")? {
        Some(mut file) => {
            let mut mime = String::new();
            file.read_to_string(&mut mime)?;
            Ok(Some(mime.trim().to_owned()))
        }
        None => Ok(None),
    }
}

/// Checks the manifest for encryption data; a missing manifest means not protected.
fn is_password_protected(zip: &mut ZipArchive<WorkbookReader>) -> Result<bool, TerpSheetError> {
    let mut reader = match zip.xml_reader("META-INF/manifest.xml")? {
        Some(reader) => reader,
        None => return Ok(false),
    };
    let mut in_file_entry = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == QName(b"manifest:file-entry") => in_file_entry = true,
        Event::End(event) if event.name() == QName(b"manifest:file-entry") => in_file_entry = false,
        Event::Start(event) if in_file_entry && event.name() == QName(b"manifest:encryption-data") => {
            return Ok(true);
        }
    });
    Ok(false)
}

fn load_sheet_names(zip: &mut ZipArchive<WorkbookReader>) -> Result<Vec<String>, TerpSheetError> {
    let mut reader = zip
        .xml_reader("content.xml")?
        .ok_or_else(|| SpreadsheetError::FileError("content.xml".to_owned()))?;
    let mut names = Vec::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TABLE => {
            if let Some(name) = event.get_attribute_value("table:name")? {
                names.push(name.to_string());
            }
        }
    });
    Ok(names)
}
