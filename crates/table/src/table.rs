use crate::error::{Result, TableError};
use ies_engine::OverrideMapping;
use serde::Serialize;
use std::collections::HashMap;

/// Options shared by every table source
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Header of the filename column (default: first column)
    pub key_column: Option<String>,

    /// Worksheet to read from spreadsheets (default: first sheet)
    pub sheet: Option<String>,
}

/// Overrides for one input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverrideRow {
    pub file_name: String,
    pub overrides: OverrideMapping,
}

/// Filename-keyed override rows, normalized from any source format.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OverrideTable {
    key_column: String,
    tags: Vec<String>,
    rows: Vec<OverrideRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl OverrideTable {
    /// Build a table from a header row and data rows of cell text.
    ///
    /// Cells are trimmed; blank cells never reach the mapping. Rows with a
    /// blank filename are ignored and the first row for a filename wins.
    pub fn from_rows<R>(header: Vec<String>, rows: R, options: &TableOptions) -> Result<Self>
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();
        if header.iter().all(String::is_empty) {
            return Err(TableError::MissingHeader);
        }

        let key_idx = match options.key_column.as_deref() {
            Some(name) => header
                .iter()
                .position(|h| h == name.trim())
                .ok_or_else(|| TableError::MissingKeyColumn(name.to_string()))?,
            None => 0,
        };

        // (column index, tag) for every named non-key column
        let tag_columns: Vec<(usize, String)> = header
            .iter()
            .enumerate()
            .filter(|(idx, h)| *idx != key_idx && !h.is_empty())
            .map(|(idx, h)| (idx, h.clone()))
            .collect();

        let mut table = Self {
            key_column: header[key_idx].clone(),
            tags: tag_columns.iter().map(|(_, tag)| tag.clone()).collect(),
            ..Self::default()
        };

        for (line, row) in rows.into_iter().enumerate() {
            let file_name = row.get(key_idx).map(|c| c.trim()).unwrap_or_default();
            if file_name.is_empty() {
                continue;
            }
            if table.index.contains_key(file_name) {
                log::warn!(
                    "Duplicate row for '{file_name}' (data row {}) ignored; first row wins",
                    line + 1
                );
                continue;
            }

            let overrides = OverrideMapping::from_cells(tag_columns.iter().map(|(idx, tag)| {
                let cell = row.get(*idx).map(|c| c.trim()).unwrap_or_default();
                (tag.as_str(), cell)
            }));

            table
                .index
                .insert(file_name.to_string(), table.rows.len());
            table.rows.push(OverrideRow {
                file_name: file_name.to_string(),
                overrides,
            });
        }

        Ok(table)
    }

    /// Overrides for `file_name`, matched exactly.
    pub fn lookup(&self, file_name: &str) -> Option<&OverrideMapping> {
        self.index
            .get(file_name)
            .map(|&idx| &self.rows[idx].overrides)
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Tag columns in header order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn rows(&self) -> &[OverrideRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
