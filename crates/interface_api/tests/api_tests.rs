//! HTTP API Tests
//!
//! Drives the router end to end over an in-memory claims store.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use domain_claims::{ClaimsService, InMemoryClaimsPort, StoredClaim};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{fake_claim_record, ClaimFixtures, ClaimRecordBuilder};

fn server_with(port: Arc<InMemoryClaimsPort>) -> TestServer {
    let state = AppState::new(ClaimsService::new(port), ApiConfig::default());
    TestServer::new(create_router(state)).unwrap()
}

fn seeded(claims: Vec<StoredClaim>) -> (Arc<InMemoryClaimsPort>, TestServer) {
    let port = Arc::new(InMemoryClaimsPort::with_claims(claims));
    (port.clone(), server_with(port))
}

mod list_claims {
    use super::*;

    #[tokio::test]
    async fn test_returns_every_claim_in_envelope() {
        let first = ClaimRecordBuilder::new().with_company_reference("CR-1").build_stored();
        let second = ClaimRecordBuilder::new().with_company_reference("CR-2").build_stored();
        let (_, server) = seeded(vec![first.clone(), second.clone()]);

        let response = server.get("/api/claims").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["_id"], first.id.to_string());
        assert_eq!(data[0]["companyReference"], "CR-1");
        assert_eq!(data[1]["_id"], second.id.to_string());
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_list() {
        let (_, server) = seeded(vec![]);

        let response = server.get("/api/claims").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let (port, server) = seeded(vec![]);
        port.set_fail_reads(true);

        let response = server.get("/api/claims").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to fetch claims");
        assert!(body.get("data").is_none());
    }
}

mod get_claim {
    use super::*;

    #[tokio::test]
    async fn test_found_claim_is_returned() {
        let stored = StoredClaim::new(core_kernel::ClaimId::generate(), fake_claim_record());
        let (_, server) = seeded(vec![stored.clone()]);

        let response = server.get(&format!("/api/claims/{}", stored.id)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["_id"], stored.id.to_string());
        assert_eq!(
            body["data"]["companyReference"],
            stored.record.company_reference.as_str()
        );
        assert_eq!(
            body["data"]["incidentDetails"]["incidentDate"],
            serde_json::to_value(stored.record.incident_details.incident_date).unwrap()
        );
    }

    #[tokio::test]
    async fn test_claim_document_shape() {
        let stored = ClaimRecordBuilder::new()
            .with_make("Ford")
            .with_pav("6400.5".parse().unwrap())
            .build_stored();
        let (_, server) = seeded(vec![stored.clone()]);

        let response = server.get(&format!("/api/claims/{}", stored.id)).await;
        let data = &response.json::<Value>()["data"];

        assert_eq!(data["policyNumber"], ClaimFixtures::POLICY_NUMBER);
        assert_eq!(data["partnerRef"], ClaimFixtures::PARTNER_REF);
        assert_eq!(data["vehicleDetails"]["registrationNumber"], ClaimFixtures::REGISTRATION);
        assert_eq!(data["vehicleDetails"]["make"], "Ford");
        assert_eq!(data["driverDetails"]["firstName"], ClaimFixtures::FIRST_NAME);
        assert_eq!(data["driverDetails"]["lastName"], ClaimFixtures::LAST_NAME);
        assert_eq!(data["statusDetails"]["status"], ClaimFixtures::STATUS);
        assert_eq!(data["financialDetails"]["pav"], 6400.5);
        assert!(data["vehicleDetails"].get("model").is_none());
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let (_, server) = seeded(vec![ClaimRecordBuilder::new().build_stored()]);

        let response = server
            .get(&format!("/api/claims/{}", ClaimFixtures::UNUSED_ID))
            .await;
        response.assert_status_not_found();

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Claim not found");
    }

    #[tokio::test]
    async fn test_malformed_id_is_500() {
        let (_, server) = seeded(vec![]);

        let response = server.get("/api/claims/not-an-id").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to fetch claim");
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let stored = ClaimRecordBuilder::new().build_stored();
        let (port, server) = seeded(vec![stored.clone()]);
        port.set_fail_reads(true);

        let response = server.get(&format!("/api/claims/{}", stored.id)).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["message"], "Failed to fetch claim");
    }

    #[tokio::test]
    async fn test_uppercase_hex_id_resolves() {
        let stored = ClaimRecordBuilder::new().build_stored();
        let (_, server) = seeded(vec![stored.clone()]);

        let upper = stored.id.to_string().to_uppercase();
        let response = server.get(&format!("/api/claims/{upper}")).await;
        response.assert_status_ok();
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let (_, server) = seeded(vec![]);

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_follows_storage() {
        let (port, server) = seeded(vec![]);

        server.get("/health/ready").await.assert_status_ok();

        port.set_fail_reads(true);
        server
            .get("/health/ready")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}

mod request_ids {
    use super::*;

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let (_, server) = seeded(vec![]);

        let response = server.get("/api/claims").await;
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let (_, server) = seeded(vec![]);

        let response = server
            .get("/api/claims")
            .add_header(
                axum::http::HeaderName::from_static("x-request-id"),
                axum::http::HeaderValue::from_static("req-123"),
            )
            .await;
        assert_eq!(response.headers()["x-request-id"], "req-123");
    }
}
