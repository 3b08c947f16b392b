//! Claims Storage Port
//!
//! The storage operations the read service and the importer need. The
//! PostgreSQL adapter in `infra_db` is the production implementation; an
//! in-memory adapter is available for tests behind the `mock` feature.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{ClaimsPort, ClaimsService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ClaimsPort> = Arc::new(PostgresClaimsAdapter::new(pool));
//! let service = ClaimsService::new(port);
//! let claims = service.list_claims().await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::{ClaimRecord, StoredClaim};

/// Storage operations for the claims collection
#[async_trait]
pub trait ClaimsPort: DomainPort + HealthCheckable {
    /// Every stored claim in storage-native order
    async fn find_all(&self) -> Result<Vec<StoredClaim>, PortError>;

    /// The claim with this identifier, if one exists
    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<StoredClaim>, PortError>;

    /// Inserts a batch of records, all or nothing
    ///
    /// Implementations run [`ClaimRecord::check_required`] on every record
    /// before writing any of them. Returns the assigned identifiers in input
    /// order.
    async fn insert_many(&self, records: Vec<ClaimRecord>) -> Result<Vec<ClaimId>, PortError>;
}

/// In-memory implementation of ClaimsPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use tokio::sync::RwLock;

    /// Vector-backed claims store with switchable failures
    #[derive(Debug, Default)]
    pub struct InMemoryClaimsPort {
        claims: Arc<RwLock<Vec<StoredClaim>>>,
        fail_reads: AtomicBool,
        fail_inserts: AtomicBool,
    }

    impl InMemoryClaimsPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a port pre-populated with stored claims
        pub fn with_claims(claims: Vec<StoredClaim>) -> Self {
            Self {
                claims: Arc::new(RwLock::new(claims)),
                ..Default::default()
            }
        }

        /// Makes every read fail with a connection error
        pub fn set_fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        /// Makes every insert fail after validation
        pub fn set_fail_inserts(&self, fail: bool) {
            self.fail_inserts.store(fail, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }

        pub async fn snapshot(&self) -> Vec<StoredClaim> {
            self.claims.read().await.clone()
        }

        fn check_reads(&self) -> Result<(), PortError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(PortError::connection("in-memory store unavailable"));
            }
            Ok(())
        }
    }

    impl DomainPort for InMemoryClaimsPort {}

    #[async_trait]
    impl HealthCheckable for InMemoryClaimsPort {
        async fn health_check(&self) -> HealthCheckResult {
            let healthy = !self.fail_reads.load(Ordering::SeqCst);
            HealthCheckResult {
                adapter_id: "in-memory-claims".to_string(),
                status: if healthy { AdapterHealth::Healthy } else { AdapterHealth::Unhealthy },
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimsPort for InMemoryClaimsPort {
        async fn find_all(&self) -> Result<Vec<StoredClaim>, PortError> {
            self.check_reads()?;
            Ok(self.claims.read().await.clone())
        }

        async fn find_by_id(&self, id: &ClaimId) -> Result<Option<StoredClaim>, PortError> {
            self.check_reads()?;
            let claims = self.claims.read().await;
            Ok(claims.iter().find(|c| &c.id == id).cloned())
        }

        async fn insert_many(&self, records: Vec<ClaimRecord>) -> Result<Vec<ClaimId>, PortError> {
            for record in &records {
                record.check_required().map_err(|e| {
                    PortError::validation_field(e.to_string(), e.field().unwrap_or_default())
                })?;
            }
            if self.fail_inserts.load(Ordering::SeqCst) {
                return Err(PortError::internal("in-memory insert failure"));
            }

            let mut claims = self.claims.write().await;
            let stored: Vec<StoredClaim> = records
                .into_iter()
                .map(|record| StoredClaim::new(ClaimId::generate(), record))
                .collect();
            let ids = stored.iter().map(|c| c.id).collect();
            claims.extend(stored);
            Ok(ids)
        }
    }
}
