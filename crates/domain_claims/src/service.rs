//! Claims read service

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::{ClaimId, HealthCheckResult};

use crate::claim::StoredClaim;
use crate::error::ClaimError;
use crate::ports::ClaimsPort;

/// Read-only access to stored claims
///
/// Each call is an independent round trip to the port; nothing is cached.
#[derive(Clone)]
pub struct ClaimsService {
    port: Arc<dyn ClaimsPort>,
}

impl ClaimsService {
    pub fn new(port: Arc<dyn ClaimsPort>) -> Self {
        Self { port }
    }

    /// Every stored claim, unfiltered and unsorted
    #[instrument(skip(self))]
    pub async fn list_claims(&self) -> Result<Vec<StoredClaim>, ClaimError> {
        let claims = self.port.find_all().await?;
        debug!(count = claims.len(), "Listed claims");
        Ok(claims)
    }

    /// The claim whose identifier renders as `id`
    ///
    /// Fails with `InvalidIdentifier` before touching storage when `id` is
    /// not 24 hex characters.
    #[instrument(skip(self))]
    pub async fn get_claim_by_id(&self, id: &str) -> Result<StoredClaim, ClaimError> {
        let claim_id: ClaimId = id.parse().map_err(|source| ClaimError::InvalidIdentifier {
            id: id.to_string(),
            source,
        })?;

        self.port
            .find_by_id(&claim_id)
            .await?
            .ok_or_else(|| ClaimError::NotFound(claim_id.to_string()))
    }

    /// Health of the underlying storage
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }
}
