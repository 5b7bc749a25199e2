use serde::Serialize;
use std::fmt::Display;

/// A raw cell value as read from a sheet, before any normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawValue {
    /// Returns true for empty cells and empty text. Whitespace counts as a value.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(text) => text.is_empty(),
            RawValue::Number(_) | RawValue::Bool(_) => false,
        }
    }

    /// Spreadsheet-style text form: `5` rather than `5.0`, `true`/`false`, `""` for empty.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Empty => Ok(()),
            RawValue::Text(text) => f.write_str(text),
            // f64's Display never prints a trailing ".0"
            RawValue::Number(number) => write!(f, "{}", number),
            RawValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(value.to_owned())
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// One data row keyed by the header cells above it.
/// Keys keep their sheet column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; later duplicates of a key are kept but never shadow the first.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.fields.push((key.into(), value));
    }

    /// Builder-style [`RawRecord::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true when every value is blank.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_blank())
    }
}
