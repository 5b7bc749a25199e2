//! XML parsing utilities shared by the XLSX and ODS readers.
//! Wraps the quick-xml pull reader and adds helpers for attributes and text runs.

use crate::error::TerpSheetError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

/// Errors specific to XML parsing operations
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Parse entity '{0}' failed")]
    ParseEntityError(String),

    #[error("Parse attribute value '{0}' failed")]
    ParseAttributeValueError(String),
}

/// Pull reader over a workbook part, reusing one event buffer.
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        // `<c r="A1"/>` must still produce a Start/End pair
        config.expand_empty_elements = true;
        config.trim_text(false);

        XmlReader {
            reader,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Reads the next event, `None` at end of document.
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, TerpSheetError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(TerpSheetError::XmlError(error)),
        }
    }
}

pub(crate) trait XmlAttributeHelper<'a> {
    /// Unescaped attribute value.
    fn get_value(&self) -> Result<Cow<'a, str>, TerpSheetError>;

    fn parse_value<T: FromStr>(&self) -> Result<T, TerpSheetError>;
}

impl<'a> XmlAttributeHelper<'a> for Attribute<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, TerpSheetError> {
        Ok(self.unescape_value()?)
    }

    fn parse_value<T: FromStr>(&self) -> Result<T, TerpSheetError> {
        let value = self.get_value()?;
        value
            .parse()
            .map_err(|_| XmlError::ParseAttributeValueError(value.to_string()).into())
    }
}

pub(crate) trait XmlNodeHelper<'a> {
    /// Attribute value by qualified name, `None` when the attribute is absent.
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, TerpSheetError>;

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, TerpSheetError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, TerpSheetError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.get_value())
            .transpose()
    }

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, TerpSheetError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.parse_value())
            .transpose()
    }
}

/// Builds cell text out of text and entity-reference events.
pub(crate) trait XmlTextContextHelper {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), TerpSheetError>;

    /// Resolves `&amp;`-style entities and `&#65;` / `&#x41;` character references.
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), TerpSheetError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), TerpSheetError> {
        self.push_str(&text.xml_content()?);
        Ok(())
    }

    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), TerpSheetError> {
        let raw = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16)?,
                None => number.parse::<u32>()?,
            };
            if let Some(character) = char::from_u32(code) {
                self.push(character);
            }
        } else if let Some(entity) = resolve_xml_entity(&raw) {
            self.push_str(entity);
        } else {
            Err(XmlError::ParseEntityError(raw.to_string()))?;
        }
        Ok(())
    }
}

/// Drives an [`XmlReader`] until end of document, dispatching on the given arms.
/// Unmatched events are ignored; `break` leaves the loop early.
#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::name::QName;

    #[test]
    fn text_and_references_are_joined() -> Result<(), TerpSheetError> {
        let mut reader = XmlReader::new("<t>Sour &amp; Diesel &#x41;&#66;</t>".as_bytes());
        let mut text = String::new();
        match_xml_events!(reader => {
            Event::Text(event) => text.push_bytes_text(&event)?,
            Event::GeneralRef(event) => text.push_bytes_ref(&event)?,
        });
        assert_eq!(text, "Sour & Diesel AB");
        Ok(())
    }

    #[test]
    fn attributes_parse_to_target_type() -> Result<(), TerpSheetError> {
        let mut reader = XmlReader::new(r#"<row repeat="3" name="Lab &amp; Co"/>"#.as_bytes());
        let mut repeat = None::<usize>;
        let mut name = String::new();
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == QName(b"row") => {
                repeat = event.parse_attribute_value("repeat")?;
                name = event.get_attribute_value("name")?.unwrap_or_default().to_string();
            }
        });
        assert_eq!(repeat, Some(3));
        assert_eq!(name, "Lab & Co");
        Ok(())
    }

    #[test]
    fn bad_attribute_value_is_reported() {
        let mut reader = XmlReader::new(r#"<row repeat="many"/>"#.as_bytes());
        let result: Result<Option<usize>, TerpSheetError> = (|| {
            let mut repeat = None;
            match_xml_events!(reader => {
                Event::Start(event) => repeat = event.parse_attribute_value::<usize>("repeat")?,
            });
            Ok(repeat)
        })();
        assert!(matches!(
            result,
            Err(TerpSheetError::XmlHelperError(XmlError::ParseAttributeValueError(value))) if value == "many"
        ));
    }
}
