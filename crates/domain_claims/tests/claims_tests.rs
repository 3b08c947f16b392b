//! Tests for domain_claims
//!
//! Mapper properties, the validation gate, the read service and batch import
//! behaviour against the in-memory port.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_claims::{
    map_row, Cell, ClaimCandidate, ClaimError, ClaimImporter, ClaimRecord, ClaimsPort,
    ClaimsService, ImportError, InMemoryClaimsPort, SpreadsheetRow, ValidationError, COLUMN_MAP,
};

fn required_row() -> SpreadsheetRow {
    SpreadsheetRow::new()
        .with("CompanyReference", "REF123")
        .with("PolicyNumber", "POL123")
        .with("PartnerRef", "PARTNER1")
        .with("IncidentDate", "2024-03-05")
        .with("RegistrationNumber", "AB12 CDE")
        .with("Driver_FirstName", "Jane")
        .with("Driver_LastName", "Doe")
        .with("Status", "Open")
}

// ============================================================================
// Mapper Tests
// ============================================================================

mod mapper_tests {
    use super::*;

    #[test]
    fn test_mapping_is_deterministic() {
        let row = required_row()
            .with("PAV", 4200.0)
            .with("Underpinned", "Yes")
            .with("TLChaseDates", "2024-04-01,2024-04-08");

        assert_eq!(map_row(&row), map_row(&row));
    }

    #[test]
    fn test_missing_column_leaves_target_absent() {
        let row = required_row().with("MAKE", "Ford");
        let candidate = map_row(&row);

        assert!(candidate.get("vehicleDetails.model").is_none());
        assert!(candidate.get("financialDetails.pav").is_none());
        assert!(candidate.get("notes.repairDelayNotes").is_none());
        assert_eq!(candidate.get("vehicleDetails.make"), Some(&json!("Ford")));
    }

    #[test]
    fn test_groups_present_without_columns() {
        let candidate = map_row(&SpreadsheetRow::new());
        for group in ["thirdPartyDetails", "salvageDetails.contact", "financialDetails.engineersFee"] {
            assert_eq!(candidate.get(group).map(Value::is_object), Some(true), "{group}");
        }
    }

    #[test]
    fn test_yes_flag_coercion() {
        let cases: [(Option<Cell>, bool); 5] = [
            (Some(Cell::from("Yes")), true),
            (Some(Cell::from("No")), false),
            (Some(Cell::from("")), false),
            (Some(Cell::from("yes")), false),
            (None, false),
        ];

        for (cell, expected) in cases {
            let mut row = required_row();
            if let Some(cell) = cell.clone() {
                row.insert("Underpinned", cell);
            }
            let candidate = map_row(&row);
            assert_eq!(
                candidate.get("statusDetails.underpinned"),
                Some(&Value::Bool(expected)),
                "{cell:?}"
            );
        }
    }

    #[test]
    fn test_input_row_not_mutated() {
        let row = required_row().with("Excess", 250.0);
        let before = row.clone();
        let _ = map_row(&row);
        assert_eq!(row, before);
    }
}

// ============================================================================
// Validation Gate Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_required_row_passes() {
        let record = ClaimRecord::from_candidate(&map_row(&required_row())).unwrap();

        assert_eq!(record.company_reference, "REF123");
        assert_eq!(record.driver_details.first_name, "Jane");
        assert_eq!(
            record.incident_details.incident_date,
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(record.status_details.underpinned, Some(false));
    }

    #[test]
    fn test_missing_company_reference_rejected() {
        let mut row = required_row();
        row.remove("CompanyReference");

        assert_eq!(
            ClaimRecord::from_candidate(&map_row(&row)),
            Err(ValidationError::MissingField("companyReference".to_string()))
        );
    }

    #[test]
    fn test_blank_required_cell_rejected() {
        let row = required_row().with("Driver_FirstName", Cell::Empty);
        let err = ClaimRecord::from_candidate(&map_row(&row)).unwrap_err();
        assert_eq!(err.field(), Some("driverDetails.firstName"));
    }

    #[test]
    fn test_numeric_cells_in_text_columns_keep_canonical_text() {
        let row = required_row()
            .with("PolicyNumber", 12345.0)
            .with("Driver_Contact_MobileTelephone", 7700900123i64)
            .with("EngineSize", 1600i64)
            .with("SalvageLotNumber", 42.5);

        let record = ClaimRecord::from_candidate(&map_row(&row)).unwrap();

        assert_eq!(record.policy_number, "12345");
        assert_eq!(
            record.driver_details.contact.mobile_telephone.as_deref(),
            Some("7700900123")
        );
        assert_eq!(record.vehicle_details.engine_size.as_deref(), Some("1600"));
        assert_eq!(record.salvage_details.salvage_lot_number.as_deref(), Some("42.5"));
    }

    #[test]
    fn test_full_row_maps_every_group() {
        let row = required_row()
            .with("ThirdPartyRef", "TP-1")
            .with("Driver_Contact_Email", "jane@example.com")
            .with("AuthorisedLabourAmount", 320.5)
            .with("Storage and Recovery Ref", "SR-9")
            .with("Del and Col VAT", 12.0)
            .with("SalvageValueReceived", 900.0)
            .with("MOTReceviedDate", "01/02/2024")
            .with("CustomerRetaining", "Yes")
            .with("ValuationDisputeNotes", "Disputed");

        let record = ClaimRecord::from_candidate(&map_row(&row)).unwrap();

        assert_eq!(record.third_party_details.reference.as_deref(), Some("TP-1"));
        assert_eq!(record.driver_details.contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(
            record.repairer_details.repair_timeline.authorised_amounts.labour,
            Some(dec!(320.5))
        );
        assert_eq!(record.financial_details.storage_and_recovery.reference.as_deref(), Some("SR-9"));
        assert_eq!(record.financial_details.delivery_and_collection.vat, Some(dec!(12)));
        assert_eq!(record.salvage_details.salvage_value_received, Some(dec!(900)));
        assert_eq!(record.financial_details.salvage_value_received, Some(dec!(900)));
        assert_eq!(
            record.timestamps.mot_received_date,
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(record.timestamps.customer_retaining, Some(true));
        assert_eq!(record.notes.valuation_dispute_notes.as_deref(), Some("Disputed"));
    }

    #[test]
    fn test_date_cell_accepted() {
        let date = chrono::NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        let row = required_row().with("IncidentDate", date);
        let record = ClaimRecord::from_candidate(&map_row(&row)).unwrap();
        assert_eq!(
            record.incident_details.incident_date,
            Utc.with_ymd_and_hms(2023, 11, 20, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_serialized_record_omits_absent_leaves() {
        let record = ClaimRecord::from_candidate(&map_row(&required_row())).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["incidentDetails"]["incidentDate"], "2024-03-05T00:00:00Z");
        assert!(json["vehicleDetails"].get("make").is_none());
        assert!(!json.to_string().contains("null"));
    }

    #[test]
    fn test_direct_candidate_without_flags() {
        let candidate = ClaimCandidate::new(json!({
            "companyReference": "R",
            "policyNumber": "P",
            "partnerRef": "X",
            "incidentDetails": { "incidentDate": "2024-01-01T00:00:00.000Z" },
            "vehicleDetails": { "registrationNumber": "REG" },
            "driverDetails": { "firstName": "A", "lastName": "B" },
            "statusDetails": { "status": "Closed", "underpinned": true }
        }));
        let record = ClaimRecord::try_from(candidate).unwrap();
        assert_eq!(record.status_details.underpinned, Some(true));
        assert_eq!(record.status_details.subrogated, None);
    }
}

// ============================================================================
// Read Service Tests
// ============================================================================

mod service_tests {
    use super::*;

    async fn seeded() -> (Arc<InMemoryClaimsPort>, ClaimsService, Vec<core_kernel::ClaimId>) {
        let port = Arc::new(InMemoryClaimsPort::new());
        let records = vec![
            ClaimRecord::from_candidate(&map_row(&required_row())).unwrap(),
            ClaimRecord::from_candidate(&map_row(&required_row().with("CompanyReference", "REF456")))
                .unwrap(),
        ];
        let ids = port.insert_many(records).await.unwrap();
        let service = ClaimsService::new(port.clone());
        (port, service, ids)
    }

    #[tokio::test]
    async fn test_read_by_id_round_trip() {
        let (_, service, ids) = seeded().await;

        let claim = service.get_claim_by_id(&ids[1].to_string()).await.unwrap();
        assert_eq!(claim.id, ids[1]);
        assert_eq!(claim.record.company_reference, "REF456");
    }

    #[tokio::test]
    async fn test_list_returns_everything() {
        let (_, service, _) = seeded().await;
        assert_eq!(service.list_claims().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_well_formed_unknown_id_not_found() {
        let (_, service, _) = seeded().await;
        let err = service.get_claim_by_id("000000000000000000000000").await.unwrap_err();
        assert!(matches!(err, ClaimError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_id_is_invalid_identifier() {
        let (_, service, _) = seeded().await;
        let err = service.get_claim_by_id("not-an-id").await.unwrap_err();
        assert!(matches!(err, ClaimError::InvalidIdentifier { ref id, .. } if id == "not-an-id"));
    }

    #[tokio::test]
    async fn test_health_follows_port() {
        let (port, service, _) = seeded().await;
        assert!(service.health().await.is_healthy());
        port.set_fail_reads(true);
        assert!(!service.health().await.is_healthy());
    }
}

// ============================================================================
// Import Tests
// ============================================================================

mod import_tests {
    use super::*;

    #[tokio::test]
    async fn test_import_inserts_every_row() {
        let port = Arc::new(InMemoryClaimsPort::new());
        let importer = ClaimImporter::new(port.clone());
        let rows = vec![required_row(), required_row(), required_row()];

        let summary = importer.import(&rows).await.unwrap();

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.records_inserted, 3);
        assert_eq!(port.len().await, 3);
    }

    #[tokio::test]
    async fn test_one_invalid_row_persists_nothing() {
        let port = Arc::new(InMemoryClaimsPort::new());
        let importer = ClaimImporter::new(port.clone());
        let mut bad = required_row();
        bad.remove("PolicyNumber");
        let rows = vec![required_row(), required_row(), bad, required_row()];

        let err = importer.import(&rows).await.unwrap_err();

        assert!(matches!(err, ImportError::Validation { row: 3, .. }));
        assert!(port.is_empty().await);
    }

    #[tokio::test]
    async fn test_reimport_duplicates_records() {
        let port = Arc::new(InMemoryClaimsPort::new());
        let importer = ClaimImporter::new(port.clone());
        let rows = vec![required_row()];

        let first = importer.import(&rows).await.unwrap();
        let second = importer.import(&rows).await.unwrap();

        assert_ne!(first.ids, second.ids);
        assert_eq!(port.len().await, 2);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        "[A-Za-z0-9 ]{0,12}".prop_map(Cell::Text),
        (-1.0e6f64..1.0e6).prop_map(Cell::Number),
        any::<bool>().prop_map(Cell::Bool),
        Just(Cell::Empty),
    ]
}

fn arb_row() -> impl Strategy<Value = SpreadsheetRow> {
    let columns: Vec<&'static str> = COLUMN_MAP.iter().map(|m| m.column).collect();
    proptest::collection::vec((proptest::sample::select(columns), arb_cell()), 0..20)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_mapping_is_deterministic(row in arb_row()) {
        prop_assert_eq!(map_row(&row), map_row(&row));
    }

    #[test]
    fn prop_absent_columns_yield_absent_targets(row in arb_row()) {
        let candidate = map_row(&row);
        for mapping in COLUMN_MAP {
            if mapping.kind == domain_claims::FieldKind::Flag || row.contains(mapping.column) {
                continue;
            }
            prop_assert!(candidate.get(mapping.path).is_none(), "{}", mapping.path);
        }
    }

    #[test]
    fn prop_flags_always_boolean(row in arb_row()) {
        let candidate = map_row(&row);
        for mapping in COLUMN_MAP.iter().filter(|m| m.kind == domain_claims::FieldKind::Flag) {
            let expected = matches!(row.get(mapping.column), Some(Cell::Text(t)) if t == "Yes");
            prop_assert_eq!(candidate.get(mapping.path), Some(&Value::Bool(expected)));
        }
    }
}
