use crate::error::{Result, TableError};
use crate::source::OverrideSource;
use crate::table::{OverrideTable, TableOptions};
use ies_engine::{decode_text, FallbackEncoding};
use std::fs;
use std::path::PathBuf;

/// Override table stored as CSV with a header row.
///
/// The file is decoded like an IES file (UTF-8, then the fallback encoding)
/// so tables saved by spreadsheet tools in a legacy code page still load.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: TableOptions,
    fallback: FallbackEncoding,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, options: TableOptions) -> Self {
        Self {
            path: path.into(),
            options,
            fallback: FallbackEncoding::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackEncoding) -> Self {
        self.fallback = fallback;
        self
    }

    /// Parse already-decoded CSV text.
    pub fn parse_str(text: &str, options: &TableOptions) -> Result<OverrideTable> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if header.is_empty() {
            return Err(TableError::MissingHeader);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        OverrideTable::from_rows(header, rows, options)
    }
}

impl OverrideSource for CsvSource {
    fn load(&self) -> Result<OverrideTable> {
        let bytes = fs::read(&self.path)?;
        let text = decode_text(&bytes, self.fallback)?;
        let table = Self::parse_str(&text, &self.options)?;
        log::debug!(
            "Loaded {} override rows from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("CSV {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ies_engine::Directive;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_quoted_cells_and_blank_columns() {
        let csv = "\u{feff}FileName,[LAMPPOSITION],[NEARFIELD],[TESTDATE]\n\
                   a.ies,\"0,0\",,2023-08-15\n";
        let table = CsvSource::parse_str(csv, &TableOptions::default()).unwrap();

        assert_eq!(table.key_column(), "FileName");
        let mapping = table.lookup("a.ies").unwrap();
        let entries: Vec<_> = mapping.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("[LAMPPOSITION]", &Directive::Replace("0,0".to_string())),
                ("[TESTDATE]", &Directive::Replace("2023-08-15".to_string())),
            ]
        );
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = CsvSource::parse_str("", &TableOptions::default()).unwrap_err();
        assert!(matches!(err, TableError::MissingHeader), "{err}");
    }
}
