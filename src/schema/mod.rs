//! # Canonical Schema
//!
//! The fixed vocabulary every ingested workbook is mapped onto: product
//! categories, the tracked terpenes, result columns and the normalized [`Row`].
pub mod category;
pub mod column;
pub mod row;
pub mod terpene;

pub use category::classify;
pub use category::Category;
pub use column::Column;
pub use column::ColumnKind;
pub use column::Field;
pub use row::ColumnValue;
pub use row::Row;
pub use terpene::Terpene;
pub use terpene::TerpeneProfile;
