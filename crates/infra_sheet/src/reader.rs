//! Workbook reader

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use domain_claims::{Cell, ImportError, RowSource, SpreadsheetRow};

use crate::error::SheetError;

/// Reads claim rows from the first worksheet of a workbook file
///
/// Any format calamine can open is accepted: xlsx, xlsm, xlsb, xls and ods.
#[derive(Debug, Clone)]
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the used range of the first worksheet
    pub fn first_sheet(&self) -> Result<Range<Data>, SheetError> {
        let path_display = self.path.display().to_string();
        let mut workbook = open_workbook_auto(&self.path).map_err(|source| SheetError::Open {
            path: path_display.clone(),
            source,
        })?;

        let sheet_names = workbook.sheet_names();
        debug!(path = %path_display, sheets = ?sheet_names, "Opened workbook");

        match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => Ok(range),
            Some(Err(source)) => Err(SheetError::Sheet { path: path_display, source }),
            None => Err(SheetError::NoSheets(path_display)),
        }
    }

    /// Reads every data row of the first worksheet
    pub fn rows(&self) -> Result<Vec<SpreadsheetRow>, SheetError> {
        let range = self.first_sheet()?;
        let rows = rows_from_range(&range);
        info!(path = %self.path.display(), rows = rows.len(), "Read worksheet");
        Ok(rows)
    }
}

impl RowSource for WorkbookReader {
    fn read_rows(&self) -> Result<Vec<SpreadsheetRow>, ImportError> {
        Ok(self.rows()?)
    }
}

/// Converts a worksheet range into rows keyed by the header row
///
/// Header cells are trimmed and columns with a blank header are ignored.
/// Blank cells are left out of the row entirely, and rows with no values at
/// all are skipped.
pub fn rows_from_range(range: &Range<Data>) -> Vec<SpreadsheetRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            let name = cell.to_string().trim().to_string();
            (!name.is_empty()).then_some(name)
        })
        .collect();

    rows.filter_map(|cells| {
        let row: SpreadsheetRow = headers
            .iter()
            .zip(cells)
            .filter_map(|(header, data)| Some((header.clone()?, to_cell(data)?)))
            .collect();
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

/// Converts one worksheet cell; `None` for blank cells
fn to_cell(data: &Data) -> Option<Cell> {
    match data {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Cell::Text(s.clone())),
        Data::Int(i) => Some(Cell::Number(*i as f64)),
        Data::Float(f) => Some(Cell::Number(*f)),
        Data::Bool(b) => Some(Cell::Bool(*b)),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(naive) => Cell::DateTime(naive),
            None => Cell::Number(dt.as_f64()),
        }),
        Data::DateTimeIso(s) => Some(parse_iso(s).map_or_else(|| Cell::Text(s.clone()), Cell::DateTime)),
        Data::DurationIso(s) => Some(Cell::Text(s.clone())),
        Data::Error(e) => {
            debug!(error = %e, "Skipping error cell");
            None
        }
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}
