//! Spreadsheet error types

use domain_claims::ImportError;
use thiserror::Error;

/// Errors that can occur while reading a workbook
#[derive(Debug, Error)]
pub enum SheetError {
    /// The file could not be opened as a workbook
    #[error("Failed to open workbook {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },

    /// The workbook has no worksheets
    #[error("Workbook {0} has no worksheets")]
    NoSheets(String),

    /// The first worksheet could not be read
    #[error("Failed to read first worksheet of {path}: {source}")]
    Sheet {
        path: String,
        #[source]
        source: calamine::Error,
    },
}

impl From<SheetError> for ImportError {
    fn from(error: SheetError) -> Self {
        ImportError::Source(error.to_string())
    }
}
