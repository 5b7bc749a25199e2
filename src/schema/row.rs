use crate::schema::category::Category;
use crate::schema::column::Column;
use crate::schema::terpene::Terpene;
use crate::schema::terpene::TerpeneProfile;
use serde::Serialize;

/// The value a [`Row`] holds in one [`Column`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColumnValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// One normalized lab result.
///
/// A row always names a product, and its total terpene content is always the
/// rounded sum of its own terpene readings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row {
    product: String,
    location: String,
    room: String,
    category: Category,
    thc: f64,
    terpenes: TerpeneProfile,
    total_terpenes: f64,
}

impl Row {
    /// Starts a row; `None` when the product name is blank.
    pub fn new(product: &str, category: Category) -> Option<Row> {
        let product = product.trim();
        if product.is_empty() {
            return None;
        }
        Some(Row {
            product: product.to_owned(),
            location: String::new(),
            room: String::new(),
            category,
            thc: 0.0,
            terpenes: TerpeneProfile::new(),
            total_terpenes: 0.0,
        })
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Negative and non-finite readings become 0.
    pub fn with_thc(mut self, thc: f64) -> Self {
        self.thc = if thc.is_finite() && thc > 0.0 { thc } else { 0.0 };
        self
    }

    pub fn with_terpenes(mut self, terpenes: TerpeneProfile) -> Self {
        self.total_terpenes = terpenes.total();
        self.terpenes = terpenes;
        self
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn thc(&self) -> f64 {
        self.thc
    }

    pub fn terpenes(&self) -> &TerpeneProfile {
        &self.terpenes
    }

    pub fn terpene(&self, terpene: Terpene) -> f64 {
        self.terpenes.get(terpene)
    }

    pub fn total_terpenes(&self) -> f64 {
        self.total_terpenes
    }

    pub fn value(&self, column: Column) -> ColumnValue<'_> {
        match column {
            Column::Product => ColumnValue::Text(&self.product),
            Column::Location => ColumnValue::Text(&self.location),
            Column::Category => ColumnValue::Text(self.category.name()),
            Column::Room => ColumnValue::Text(&self.room),
            Column::Thc => ColumnValue::Number(self.thc),
            Column::TotalTerpenes => ColumnValue::Number(self.total_terpenes),
            Column::Terpene(terpene) => ColumnValue::Number(self.terpenes.get(terpene)),
        }
    }
}
