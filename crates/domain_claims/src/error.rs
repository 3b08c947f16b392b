//! Claims domain errors

use core_kernel::{IdentifierError, PortError};
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by the claims read service
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Invalid claim identifier {id:?}: {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: IdentifierError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

/// Errors that abort a bulk import
///
/// Every variant means nothing from the batch was persisted.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The spreadsheet could not be opened or read
    #[error("Failed to read rows: {0}")]
    Source(String),

    /// A row failed the validation gate; `row` is 1-based over data rows
    #[error("Row {row} rejected: {source}")]
    Validation {
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Batch insert failed: {0}")]
    Storage(#[source] PortError),
}
