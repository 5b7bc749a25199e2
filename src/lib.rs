//! # Terpene Lab Results
//!
//! Reads spreadsheet exports of cannabis lab results and turns them into a
//! browsable board of normalized rows.
//!
//! ## Features
//!
//! - **Workbook formats**: Office Open XML (`.xlsx`, `.xlsm`) and OpenDocument (`.ods`),
//!   detected from the archive contents
//! - **Header detection**: title and banner rows above the real column header are skipped
//! - **Column aliases**: `Product Name`, `Store`, `Total THC %` and friends map onto one schema
//! - **Unit normalization**: percentages and mg/g readings end up on the percentage scale
//! - **Categories**: free-text product types collapse into Flower, Vape and Concentrate
//! - **Queries**: category filter, product search, typed column sort and incremental pages
//!
//! ## Example
//!
//! ```no_run
//! use terp_sheet::{Board, Category, Column, Config};
//!
//! let bytes = std::fs::read("lab-results.xlsx").unwrap();
//! let mut board = Board::new(Config::default());
//! board.load(bytes).unwrap();
//! board.select_category(Category::Vape);
//! board.sort_by(Column::Thc);
//! let page = board.next_page();
//! println!("{} ({} rows)", board.status(), page.rows.len());
//! ```
pub mod board;
pub mod config;
pub mod error;
mod helpers;
pub mod ingest;
pub mod normalize;
pub mod query;
pub mod schema;
pub mod spreadsheet;

pub use board::Board;
pub use board::Status;
pub use config::Config;
pub use error::TerpSheetError;
pub use helpers::xml::XmlError;
pub use ingest::ingest;
pub use ingest::load_workbook;
pub use ingest::Dataset;
pub use ingest::IngestError;
pub use ingest::IngestReport;
pub use query::query;
pub use query::Direction;
pub use query::Page;
pub use query::QuerySpec;
pub use query::ResultView;
pub use query::SortState;
pub use schema::Category;
pub use schema::Column;
pub use schema::Row;
pub use schema::Terpene;
pub use spreadsheet::criteria::Criteria;
pub use spreadsheet::open_spreadsheet;
pub use spreadsheet::Spreadsheet;
