//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain
//! values. Queries use the runtime-checked SQLx API so the crate builds
//! without a live database.

pub mod claims;

pub use claims::{ClaimDocumentRow, ClaimsRepository};
