//! Core Kernel - Foundational types for the claims service
//!
//! This crate provides the building blocks shared by every other crate:
//! - The storage-assigned claim identifier
//! - Port traits and the unified port error used by storage adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClaimId, IdentifierError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
