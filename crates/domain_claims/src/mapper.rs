//! Spreadsheet row mapper
//!
//! Pure transformation from one flat row to one claim candidate. No
//! validation happens here; mismatched cell types pass straight through to
//! the validation gate.

use serde_json::Value;

use crate::candidate::ClaimCandidate;
use crate::row::{Cell, SpreadsheetRow};
use crate::schema::{FieldKind, COLUMN_MAP};

/// The only cell text that sets a flag
pub const FLAG_TRUE: &str = "Yes";

/// Maps one row to a claim candidate
///
/// Every sub-structure is present in the output. A column missing from the
/// row leaves its target key absent, while a blank cell yields `null`. Flag
/// targets are always set: `true` exactly when the cell holds the text
/// `"Yes"`.
pub fn map_row(row: &SpreadsheetRow) -> ClaimCandidate {
    let mut candidate = ClaimCandidate::skeleton();

    for mapping in COLUMN_MAP {
        let cell = row.get(mapping.column);
        match mapping.kind {
            FieldKind::Flag => {
                let set = matches!(cell, Some(Cell::Text(text)) if text == FLAG_TRUE);
                candidate.set(mapping.path, Value::Bool(set));
            }
            _ => {
                if let Some(cell) = cell {
                    candidate.set(mapping.path, cell.to_value());
                }
            }
        }
    }

    candidate
}

/// Maps every row, preserving order
pub fn map_rows(rows: &[SpreadsheetRow]) -> Vec<ClaimCandidate> {
    rows.iter().map(map_row).collect()
}
