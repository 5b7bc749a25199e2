//! # Row Normalization
//!
//! Turns one keyed spreadsheet record into a canonical [`Row`], resolving
//! header aliases, classifying the product type and reading every numeric
//! column onto the percentage scale.
use crate::schema::classify;
use crate::schema::Field;
use crate::schema::Row;
use crate::schema::Terpene;
use crate::schema::TerpeneProfile;
use crate::spreadsheet::record::RawRecord;
use crate::spreadsheet::record::RawValue;
use thiserror::Error;

pub mod alias;
pub mod header;
pub mod value;

pub use alias::resolve;
pub use header::locate_header;
pub use header::HEADER_SCAN_ROWS;
pub use value::normalize_percent;
pub use value::parse_percent;
pub use value::Reading;

/// Why a record produced no row.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Rejection {
    #[error("Record has no product name")]
    MissingProduct,

    #[error("Product type '{0}' is not a known category")]
    UnclassifiedCategory(String),
}

/// Builds the canonical row for a record, or says why it has none.
pub fn normalize(record: &RawRecord) -> Result<Row, Rejection> {
    let product = field_text(record, Field::Product);
    if product.trim().is_empty() {
        return Err(Rejection::MissingProduct);
    }
    let label = field_text(record, Field::Category);
    let category = classify(&label).ok_or_else(|| Rejection::UnclassifiedCategory(label.to_owned()))?;
    let row = Row::new(&product, category).ok_or(Rejection::MissingProduct)?;

    let mut terpenes = TerpeneProfile::new();
    for terpene in Terpene::ALL {
        let value = resolve(record, &[terpene.name()])
            .and_then(|key| record.get(key))
            .map(normalize_percent)
            .unwrap_or_default();
        terpenes.set(terpene, value);
    }

    Ok(row
        .with_location(field_text(record, Field::Location))
        .with_room(field_text(record, Field::Room))
        .with_thc(field_value(record, Field::Thc).map(normalize_percent).unwrap_or_default())
        .with_terpenes(terpenes))
}

fn field_value(record: &RawRecord, field: Field) -> Option<&RawValue> {
    resolve(record, field.aliases()).and_then(|key| record.get(key))
}

/// Text of a field, empty when the column is absent.
fn field_text(record: &RawRecord, field: Field) -> String {
    field_value(record, field).map(RawValue::to_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Category;

    #[test]
    fn og_kush() {
        let record = RawRecord::new()
            .with("Product", "OG Kush 3.5g")
            .with("Category", "Flower")
            .with("THC", "22.9%")
            .with("BetaCaryphyllene", "1.10%");
        let row = normalize(&record).unwrap();
        assert_eq!(row.product(), "OG Kush 3.5g");
        assert_eq!(row.category(), Category::Flower);
        assert_eq!(row.thc(), 22.9);
        assert_eq!(row.terpene(Terpene::BetaCaryphyllene), 1.1);
        assert_eq!(row.total_terpenes(), 1.1);
        assert_eq!(row.location(), "");
        assert_eq!(row.room(), "");
    }

    #[test]
    fn sauce_cartridge_is_a_vape() {
        let record = RawRecord::new()
            .with("Product", "Live Resin Sauce")
            .with("Product Type", "Sauce Cartridge")
            .with("THC", "750 mg/g");
        let row = normalize(&record).unwrap();
        assert_eq!(row.category(), Category::Vape);
        assert_eq!(row.thc(), 75.0);
    }

    #[test]
    fn blank_product_is_rejected() {
        let record = RawRecord::new().with("Product", "").with("Category", "Flower");
        assert_eq!(normalize(&record), Err(Rejection::MissingProduct));

        let record = RawRecord::new().with("Product", "   ").with("Category", "Flower");
        assert_eq!(normalize(&record), Err(Rejection::MissingProduct));

        let record = RawRecord::new().with("Category", "Flower");
        assert_eq!(normalize(&record), Err(Rejection::MissingProduct));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let record = RawRecord::new().with("Product", "Gummies").with("Type", "Edible");
        assert_eq!(normalize(&record), Err(Rejection::UnclassifiedCategory("Edible".to_owned())));

        let record = RawRecord::new().with("Product", "Mystery");
        assert_eq!(normalize(&record), Err(Rejection::UnclassifiedCategory(String::new())));
    }

    #[test]
    fn aliases_and_numbers() {
        let record = RawRecord::new()
            .with("item", "Blue Dream")
            .with("PRODUCTTYPE", "Wax")
            .with("Store", "Uptown")
            .with("ROOM", "Vault")
            .with("Total THC %", 81.5)
            .with("limonene", 0.42)
            .with("Linalool", "3 mg/g")
            .with("Humulene", "ND");
        let row = normalize(&record).unwrap();
        assert_eq!(row.product(), "Blue Dream");
        assert_eq!(row.category(), Category::Concentrate);
        assert_eq!(row.location(), "Uptown");
        assert_eq!(row.room(), "Vault");
        assert_eq!(row.thc(), 81.5);
        assert_eq!(row.terpene(Terpene::Limonene), 0.42);
        assert_eq!(row.terpene(Terpene::Linalool), 0.3);
        assert_eq!(row.terpene(Terpene::Humulene), 0.0);
        assert_eq!(row.total_terpenes(), 0.72);
    }

    #[test]
    fn total_matches_terpenes_without_terpene_columns() {
        let record = RawRecord::new().with("Product", "Kush").with("Category", "flower");
        let row = normalize(&record).unwrap();
        assert_eq!(row.total_terpenes(), 0.0);
        assert_eq!(row.total_terpenes(), row.terpenes().total());
    }

    #[test]
    fn numeric_product_names_are_kept() {
        let record = RawRecord::new().with("Product", 420.0).with("Category", "Vape");
        assert_eq!(normalize(&record).unwrap().product(), "420");
    }
}
