use crate::error::{Result, TableError};
use crate::source::OverrideSource;
use crate::table::{OverrideTable, TableOptions};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::PathBuf;

/// Override table stored in a spreadsheet (xlsx, xlsm, xlsb, xls, ods).
///
/// The first used row of the selected worksheet is the header.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
    options: TableOptions,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>, options: TableOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Normalize a worksheet range into an override table.
    pub fn table_from_range(range: &Range<Data>, options: &TableOptions) -> Result<OverrideTable> {
        let mut rows = range.rows();
        let header = rows
            .next()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
            .ok_or(TableError::MissingHeader)?;
        let body = rows.map(|row| row.iter().map(cell_text).collect());
        OverrideTable::from_rows(header, body, options)
    }
}

impl OverrideSource for WorkbookSource {
    fn load(&self) -> Result<OverrideTable> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let sheet = select_sheet(&workbook.sheet_names(), self.options.sheet.as_deref())?;

        let range = workbook.worksheet_range(&sheet)?;
        let table = Self::table_from_range(&range, &self.options)?;
        log::debug!(
            "Loaded {} override rows from {} (sheet '{sheet}')",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("spreadsheet {}", self.path.display())
    }
}

/// The named worksheet, or the first one when no name is configured.
fn select_sheet(names: &[String], wanted: Option<&str>) -> Result<String> {
    match wanted {
        Some(wanted) => names
            .iter()
            .find(|name| name.as_str() == wanted)
            .cloned()
            .ok_or_else(|| TableError::MissingSheet(wanted.to_string())),
        None => names.first().cloned().ok_or(TableError::NoWorksheets),
    }
}

/// Render a cell the way it displays in the sheet.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        // f64 Display drops a zero fraction: 2023.0 -> "2023"
        Data::Float(v) => v.to_string(),
        Data::Bool(v) => String::from(if *v { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => {
                let text = value.format("%Y-%m-%d %H:%M:%S").to_string();
                match text.strip_suffix(" 00:00:00") {
                    Some(date) => date.to_string(),
                    None => text,
                }
            }
            None => dt.as_f64().to_string(),
        },
    }
}
