use crate::schema::terpene::Terpene;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Canonical row fields that are read from variably named header cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Product,
    Category,
    Location,
    Room,
    Thc,
}

impl Field {
    /// Accepted header names, most preferred first. Matching ignores case.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Product => &["Product", "Product Name", "Name", "Item"],
            Field::Category => &["Category", "Category Name", "Product Type", "ProductType", "Type"],
            Field::Location => &["Location", "Store", "Dispensary"],
            Field::Room => &["Room"],
            Field::Thc => &["THC", "THC%", "THC %", "Total THC", "Total THC %", "TotalTHC"],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown column '{0}'")]
pub struct UnknownColumn(pub String);

/// A sortable, displayable column of the result table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Product,
    Location,
    Category,
    Room,
    Thc,
    TotalTerpenes,
    Terpene(Terpene),
}

impl Column {
    const BASE: [Column; 6] = [
        Column::Product,
        Column::Location,
        Column::Category,
        Column::Room,
        Column::Thc,
        Column::TotalTerpenes,
    ];

    /// Base columns followed by every terpene in display order.
    pub fn all() -> Vec<Column> {
        Column::BASE
            .into_iter()
            .chain(Terpene::ALL.into_iter().map(Column::Terpene))
            .collect()
    }

    /// Stable identifier of the column.
    pub fn key(self) -> &'static str {
        match self {
            Column::Product => "Product",
            Column::Location => "Location",
            Column::Category => "Product Type",
            Column::Room => "Room",
            Column::Thc => "THC",
            Column::TotalTerpenes => "Total Terpenes",
            Column::Terpene(terpene) => terpene.name(),
        }
    }

    /// Header text shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Column::Category => "Category",
            column => column.key(),
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Product | Column::Location | Column::Category | Column::Room => ColumnKind::Text,
            Column::Thc | Column::TotalTerpenes | Column::Terpene(_) => ColumnKind::Numeric,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == ColumnKind::Numeric
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Column {
    type Err = UnknownColumn;

    /// Accepts a key or a label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Column::all()
            .into_iter()
            .find(|column| column.key().eq_ignore_ascii_case(name) || column.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownColumn(s.to_owned()))
    }
}
