//! Bulk importer
//!
//! Reads every row from a [`RowSource`], maps and validates all of them, then
//! hands the whole batch to the storage port in one call. A single bad row
//! stops the import before anything is written.

use std::sync::Arc;

use tracing::{info, warn};

use core_kernel::ClaimId;

use crate::claim::ClaimRecord;
use crate::error::ImportError;
use crate::mapper::map_row;
use crate::ports::ClaimsPort;
use crate::row::SpreadsheetRow;

/// Anything that yields spreadsheet data rows
pub trait RowSource: Send + Sync {
    fn read_rows(&self) -> Result<Vec<SpreadsheetRow>, ImportError>;
}

impl RowSource for Vec<SpreadsheetRow> {
    fn read_rows(&self) -> Result<Vec<SpreadsheetRow>, ImportError> {
        Ok(self.clone())
    }
}

impl RowSource for [SpreadsheetRow] {
    fn read_rows(&self) -> Result<Vec<SpreadsheetRow>, ImportError> {
        Ok(self.to_vec())
    }
}

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub records_inserted: usize,
    pub ids: Vec<ClaimId>,
}

/// Maps and validates every row, stopping at the first rejected one
///
/// Row numbers in errors are 1-based over data rows.
pub fn prepare_batch(rows: &[SpreadsheetRow]) -> Result<Vec<ClaimRecord>, ImportError> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            ClaimRecord::from_candidate(&map_row(row)).map_err(|source| {
                warn!(row = idx + 1, error = %source, "Row rejected");
                ImportError::Validation { row: idx + 1, source }
            })
        })
        .collect()
}

/// One-shot spreadsheet to claims import
pub struct ClaimImporter {
    port: Arc<dyn ClaimsPort>,
}

impl ClaimImporter {
    pub fn new(port: Arc<dyn ClaimsPort>) -> Self {
        Self { port }
    }

    /// Runs the import; nothing is persisted unless every row is accepted
    ///
    /// Re-running with the same input inserts the records again.
    pub async fn import(&self, source: &dyn RowSource) -> Result<ImportSummary, ImportError> {
        let rows = source.read_rows()?;
        info!(rows = rows.len(), "Read spreadsheet rows");

        let records = prepare_batch(&rows)?;
        if records.is_empty() {
            info!("No rows to import");
            return Ok(ImportSummary { rows_read: 0, records_inserted: 0, ids: Vec::new() });
        }

        let ids = self
            .port
            .insert_many(records)
            .await
            .map_err(ImportError::Storage)?;
        info!(inserted = ids.len(), "Claims imported");

        Ok(ImportSummary {
            rows_read: rows.len(),
            records_inserted: ids.len(),
            ids,
        })
    }
}
