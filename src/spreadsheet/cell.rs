use crate::spreadsheet::record::RawValue;

/// Types of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as `1`/`0`
    Boolean,
    /// Numeric values
    Number,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// ISO 8601 duration strings (ODS time cells)
    IsoDuration,
    /// Inline string values
    InlineString,
    /// Shared string table references, resolved while reading
    SharedString,
    /// Error values (`#DIV/0!` and friends)
    Error,
}

/// Represents a single cell in a spreadsheet with position, type, and value.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    /// Cell data type
    pub(crate) kind: CellType,
    /// Cell value as string
    pub(crate) value: String,
}

impl Cell {
    /// Converts the stored text into the raw value handed to record building.
    /// Numbers that fail to parse are kept as text rather than dropped.
    pub(crate) fn to_raw_value(&self) -> RawValue {
        match self.kind {
            CellType::Empty | CellType::Error => RawValue::Empty,
            CellType::Boolean => RawValue::Bool(self.value == "1"),
            CellType::Number => match self.value.trim().parse::<f64>() {
                Ok(number) => RawValue::Number(number),
                Err(_) => RawValue::from(self.value.as_str()),
            },
            CellType::IsoDateTime => RawValue::from(self.value.replace('T', " ").as_str()),
            CellType::IsoDuration => RawValue::from(
                self.value
                    .replace("PT", "")
                    .replace('H', ":")
                    .replace('M', ":")
                    .replace('S', "")
                    .as_str(),
            ),
            CellType::InlineString | CellType::SharedString => RawValue::from(self.value.as_str()),
        }
    }
}
