use thiserror::Error;

/// Result type for table loading
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while loading an override table
#[derive(Error, Debug)]
pub enum TableError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Table bytes could not be decoded
    #[error(transparent)]
    Decode(#[from] ies_engine::EngineError),

    /// Extension is neither CSV nor a known spreadsheet format
    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    /// No header row
    #[error("Table has no header row")]
    MissingHeader,

    /// Configured key column absent from the header
    #[error("Key column '{0}' not found in header")]
    MissingKeyColumn(String),

    /// Configured worksheet absent from the workbook
    #[error("Worksheet '{0}' not found")]
    MissingSheet(String),

    /// Workbook contains no worksheets
    #[error("Workbook has no worksheets")]
    NoWorksheets,
}
