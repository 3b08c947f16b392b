//! Claims Domain
//!
//! This crate holds the claim record model and everything that produces or
//! reads it: the spreadsheet column map, the row mapper, the validation gate,
//! the storage port, the read service and the bulk importer.
//!
//! # Import Pipeline
//!
//! ```text
//! SpreadsheetRow -> map_row -> ClaimCandidate -> ClaimRecord::from_candidate
//!                                                      |
//!                                       ClaimsPort::insert_many (one batch)
//! ```

pub mod candidate;
pub mod claim;
pub mod error;
pub mod import;
pub mod mapper;
pub mod ports;
pub mod row;
pub mod schema;
pub mod service;
pub mod validation;

pub use candidate::ClaimCandidate;
pub use claim::{
    AuthorisedAmounts, ChargeBreakdown, ClaimRecord, DriverAddress, DriverContact, DriverDetails,
    FinancialDetails, IncidentDetails, Notes, RepairTimeline, RepairerContact, RepairerDetails,
    SalvageContact, SalvageDetails, StatusDetails, StorageAndRecovery, StoredClaim,
    ThirdPartyDetails, Timestamps, VehicleDetails,
};
pub use error::{ClaimError, ImportError};
pub use import::{prepare_batch, ClaimImporter, ImportSummary, RowSource};
pub use mapper::{map_row, map_rows};
pub use ports::ClaimsPort;
pub use row::{Cell, SpreadsheetRow};
pub use schema::{ColumnMapping, FieldKind, COLUMN_MAP};
pub use service::ClaimsService;
pub use validation::ValidationError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryClaimsPort;
