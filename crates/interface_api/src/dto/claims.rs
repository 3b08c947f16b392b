//! Claims DTOs

use serde::{Deserialize, Serialize};

use domain_claims::StoredClaim;

/// Successful response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Failed response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

pub type ClaimResponse = ApiResponse<StoredClaim>;
pub type ClaimListResponse = ApiResponse<Vec<StoredClaim>>;
