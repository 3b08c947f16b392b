//! Claims handlers

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{error, info};

use domain_claims::ClaimError;

use crate::dto::{ApiResponse, ClaimListResponse, ClaimResponse};
use crate::{error::ApiError, AppState};

pub const CLAIM_NOT_FOUND: &str = "Claim not found";
pub const FETCH_CLAIM_FAILED: &str = "Failed to fetch claim";
pub const FETCH_CLAIMS_FAILED: &str = "Failed to fetch claims";

/// Lists every stored claim
pub async fn list_claims(State(state): State<AppState>) -> Result<Json<ClaimListResponse>, ApiError> {
    let claims = state.claims.list_claims().await.map_err(|e| {
        error!(error = %e, "Failed to fetch claims");
        ApiError::Internal(FETCH_CLAIMS_FAILED.to_string())
    })?;

    Ok(Json(ApiResponse::ok(claims)))
}

/// Gets a claim by its identifier
///
/// A malformed identifier is reported like any other failure, as a 500.
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    match state.claims.get_claim_by_id(&id).await {
        Ok(claim) => Ok(Json(ApiResponse::ok(claim))),
        Err(ClaimError::NotFound(_)) => {
            info!(claim_id = %id, "Claim not found");
            Err(ApiError::NotFound(CLAIM_NOT_FOUND.to_string()))
        }
        Err(e) => {
            error!(claim_id = %id, error = %e, "Failed to fetch claim");
            Err(ApiError::Internal(FETCH_CLAIM_FAILED.to_string()))
        }
    }
}
