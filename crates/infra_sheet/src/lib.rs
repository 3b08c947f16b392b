//! Spreadsheet Infrastructure
//!
//! Reads the first worksheet of a workbook into [`SpreadsheetRow`]s for the
//! bulk importer. The first row of the used range is the header row; every
//! following row becomes one claim row keyed by header.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_sheet::WorkbookReader;
//! use domain_claims::ClaimImporter;
//!
//! let reader = WorkbookReader::new("claims.xlsx");
//! let summary = importer.import(&reader).await?;
//! ```
//!
//! [`SpreadsheetRow`]: domain_claims::SpreadsheetRow

pub mod error;
pub mod reader;

pub use error::SheetError;
pub use reader::{rows_from_range, WorkbookReader};
