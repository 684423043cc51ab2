//! Override table ingestion.
//!
//! CSV files and spreadsheets both normalize into one [`OverrideTable`]:
//! a filename-keyed set of ordered tag -> directive mappings, consumed by
//! `ies_engine`. The first column (or a named key column) holds the input
//! filename; every other named column is a tag.

mod csv_source;
mod error;
mod source;
mod table;
mod template;
mod workbook;

pub use csv_source::CsvSource;
pub use error::{Result, TableError};
pub use source::{load_table, open_source, OverrideSource};
pub use table::{OverrideRow, OverrideTable, TableOptions};
pub use template::{write_template, TEMPLATE_COLUMNS};
pub use workbook::WorkbookSource;
