//! Test Utilities Crate
//!
//! Shared test infrastructure for the claims service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Known-good rows and constants
//! - `builders`: Builder for claim records with sensible defaults
//! - `database`: PostgreSQL test container management
//! - `generators`: Fake claims and rows

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
