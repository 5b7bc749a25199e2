//! ZIP archive helpers for the XLSX and ODS containers.

use crate::error::TerpSheetError;
use crate::helpers::xml::XmlReader;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

pub(crate) trait ZipHelper<RS: Read + Seek> {
    /// Gets an entry by name (case-insensitive, path separator agnostic)
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, TerpSheetError>;

    /// Returns true if the archive holds an entry with this name
    fn contains(&self, name: &str) -> bool;

    /// Creates an XML reader over an entry
    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, TerpSheetError>;
}

fn normalize_entry_name(name: &str) -> String {
    name.replace('\\', "/")
}

impl<RS: Read + Seek> ZipHelper<RS> for ZipArchive<RS> {
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, TerpSheetError> {
        let pattern = normalize_entry_name(name);
        let path = self
            .file_names()
            .find(|file_name| pattern.eq_ignore_ascii_case(&normalize_entry_name(file_name)))
            .map(|file_name| file_name.to_owned());
        match path.map(|file_name| self.by_name(&file_name)).transpose() {
            Ok(Some(file)) => Ok(Some(file)),
            Ok(None) | Err(ZipError::FileNotFound) => Ok(None),
            Err(error) => Err(error)?,
        }
    }

    fn contains(&self, name: &str) -> bool {
        let pattern = normalize_entry_name(name);
        self.file_names()
            .any(|file_name| pattern.eq_ignore_ascii_case(&normalize_entry_name(file_name)))
    }

    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, TerpSheetError> {
        let reader = self
            .file(name)?
            .map(|file| XmlReader::new(BufReader::new(file)));
        Ok(reader)
    }
}
