use crate::csv_source::CsvSource;
use crate::error::{Result, TableError};
use crate::table::{OverrideTable, TableOptions};
use crate::workbook::WorkbookSource;
use ies_engine::FallbackEncoding;
use std::path::Path;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "xla", "xlam", "ods"];

/// Anything that can produce an override table.
pub trait OverrideSource {
    fn load(&self) -> Result<OverrideTable>;

    /// Short human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Pick a source implementation from the file extension.
pub fn open_source(
    path: &Path,
    options: TableOptions,
    fallback: FallbackEncoding,
) -> Result<Box<dyn OverrideSource>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ext == "csv" {
        return Ok(Box::new(
            CsvSource::new(path, options).with_fallback(fallback),
        ));
    }
    if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(Box::new(WorkbookSource::new(path, options)));
    }
    Err(TableError::UnsupportedFormat(path.display().to_string()))
}

/// Open and load a table in one step.
pub fn load_table(
    path: &Path,
    options: TableOptions,
    fallback: FallbackEncoding,
) -> Result<OverrideTable> {
    let source = open_source(path, options, fallback)?;
    log::info!("Loading overrides from {}", source.describe());
    source.load()
}
