//! Response envelopes

pub mod claims;

pub use claims::{ApiResponse, ClaimListResponse, ClaimResponse, ErrorResponse};
