//! PostgreSQL Claims Adapter
//!
//! Implements `ClaimsPort` on top of [`ClaimsRepository`]. Identifiers are
//! minted here at insert time and every record of a batch is checked before
//! the transaction starts.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use core_kernel::{AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{ClaimRecord, ClaimsPort, StoredClaim};

use crate::error::{db_to_port_error, DatabaseError};
use crate::repositories::{ClaimDocumentRow, ClaimsRepository};

const ADAPTER_ID: &str = "postgres-claims-adapter";

/// PostgreSQL adapter for the claims port
#[derive(Debug, Clone)]
pub struct PostgresClaimsAdapter {
    repo: ClaimsRepository,
}

impl PostgresClaimsAdapter {
    /// Creates a new adapter with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: ClaimsRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresClaimsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repo.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClaimsPort for PostgresClaimsAdapter {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<StoredClaim>, PortError> {
        let rows = self.repo.find_all().await.map_err(db_to_port_error)?;
        rows.into_iter()
            .map(row_to_claim)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<StoredClaim>, PortError> {
        let row = self
            .repo
            .find_by_id(&id.to_hex())
            .await
            .map_err(db_to_port_error)?;
        row.map(row_to_claim).transpose().map_err(db_to_port_error)
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn insert_many(&self, records: Vec<ClaimRecord>) -> Result<Vec<ClaimId>, PortError> {
        let mut documents = Vec::with_capacity(records.len());
        for record in &records {
            record.check_required().map_err(|e| {
                warn!(error = %e, "Claim rejected at storage boundary");
                db_to_port_error(DatabaseError::Validation {
                    field: e.field().unwrap_or_default().to_string(),
                    message: e.to_string(),
                })
            })?;
            let document = serde_json::to_value(record)
                .map_err(|e| db_to_port_error(DatabaseError::from(e)))?;
            documents.push((ClaimId::generate(), document));
        }

        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(String, serde_json::Value)> = documents
            .iter()
            .map(|(id, doc)| (id.to_hex(), doc.clone()))
            .collect();
        self.repo.insert_many(&rows).await.map_err(db_to_port_error)?;

        info!(count = rows.len(), "Inserted claims");
        Ok(documents.into_iter().map(|(id, _)| id).collect())
    }
}

/// Converts a stored document row into a domain claim
fn row_to_claim(row: ClaimDocumentRow) -> Result<StoredClaim, DatabaseError> {
    let id: ClaimId = row
        .id
        .trim()
        .parse()
        .map_err(|e| DatabaseError::SerializationError(format!("bad claim id {:?}: {}", row.id, e)))?;
    let record: ClaimRecord = serde_json::from_value(row.document.0)?;
    Ok(StoredClaim::new(id, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::types::Json;

    #[test]
    fn test_row_to_claim() {
        let row = ClaimDocumentRow {
            id: "67c5ebefd0a6b39a8f7391ec".to_string(),
            document: Json(json!({
                "companyReference": "REF1",
                "policyNumber": "POL1",
                "partnerRef": "P1",
                "incidentDetails": { "incidentDate": "2024-03-05T00:00:00Z" },
                "vehicleDetails": { "registrationNumber": "AB12 CDE" },
                "driverDetails": { "firstName": "Jane", "lastName": "Doe" },
                "statusDetails": { "status": "Open", "underpinned": false }
            })),
        };

        let claim = row_to_claim(row).unwrap();
        assert_eq!(claim.id.to_hex(), "67c5ebefd0a6b39a8f7391ec");
        assert_eq!(claim.record.policy_number, "POL1");
        assert_eq!(claim.record.status_details.underpinned, Some(false));
    }

    #[test]
    fn test_row_with_bad_document_is_serialization_error() {
        let row = ClaimDocumentRow {
            id: "67c5ebefd0a6b39a8f7391ec".to_string(),
            document: Json(json!({ "companyReference": 5 })),
        };
        assert!(matches!(row_to_claim(row), Err(DatabaseError::SerializationError(_))));
    }
}
