//! Claim record aggregate
//!
//! The canonical nested shape of one insurance claim as persisted in the
//! claims collection. Sub-structures are plain groupings with no identity of
//! their own. Optional leaves are omitted from the serialized document when
//! absent, so "not provided" never shows up as `null`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use core_kernel::ClaimId;
use crate::schema::required_paths;
use crate::validation::ValidationError;

/// One insurance claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// Company reference
    #[validate(length(min = 1))]
    pub company_reference: String,
    /// Policy number
    #[validate(length(min = 1))]
    pub policy_number: String,
    /// Partner reference
    #[validate(length(min = 1))]
    pub partner_ref: String,
    pub incident_details: IncidentDetails,
    #[validate(nested)]
    pub vehicle_details: VehicleDetails,
    #[serde(default)]
    pub third_party_details: ThirdPartyDetails,
    #[validate(nested)]
    pub driver_details: DriverDetails,
    #[serde(default)]
    pub repairer_details: RepairerDetails,
    #[serde(default)]
    pub salvage_details: SalvageDetails,
    #[serde(default)]
    pub financial_details: FinancialDetails,
    #[validate(nested)]
    pub status_details: StatusDetails,
    #[serde(default)]
    pub timestamps: Timestamps,
    #[serde(default)]
    pub notes: Notes,
}

impl ClaimRecord {
    /// Checks that every required string is non-empty
    ///
    /// Presence is guaranteed by the type; this catches records built
    /// directly with empty strings. Storage adapters call it on every record
    /// of a batch before writing any of them.
    pub fn check_required(&self) -> Result<(), ValidationError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let mut failing = Vec::new();
        collect_violations(&errors, "", &mut failing);
        let field = required_paths()
            .find(|path| failing.iter().any(|f| f == path))
            .map(str::to_string)
            .or_else(|| failing.into_iter().min())
            .unwrap_or_else(|| "claim".to_string());
        Err(ValidationError::EmptyField(field))
    }
}

/// Collects the dotted JSON path of every failing field
fn collect_violations(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            camel_case(name)
        } else {
            format!("{}.{}", prefix, camel_case(name))
        };
        match kind {
            ValidationErrorsKind::Field(_) => out.push(path),
            ValidationErrorsKind::Struct(inner) => collect_violations(inner, &path, out),
            ValidationErrorsKind::List(_) => {}
        }
    }
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// A claim together with its storage-assigned identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredClaim {
    #[serde(rename = "_id")]
    pub id: ClaimId,
    #[serde(flatten)]
    pub record: ClaimRecord,
}

impl StoredClaim {
    pub fn new(id: ClaimId, record: ClaimRecord) -> Self {
        Self { id, record }
    }
}

/// Incident details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetails {
    pub incident_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accident_circumstances: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_to_vehicle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_existing_damage: Option<String>,
}

impl IncidentDetails {
    pub fn new(incident_date: DateTime<Utc>) -> Self {
        Self {
            incident_date,
            accident_circumstances: None,
            damage_to_vehicle: None,
            pre_existing_damage: None,
        }
    }
}

/// Insured vehicle details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[validate(length(min = 1))]
    pub registration_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ims_vehicle_status: Option<String>,
}

impl VehicleDetails {
    pub fn new(registration_number: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            make: None,
            model: None,
            engine_size: None,
            registration_date: None,
            vehicle_status: None,
            ims_vehicle_status: None,
        }
    }
}

/// Third party involved in the incident
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurer: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
}

/// Driver at the time of the incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DriverDetails {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub address: DriverAddress,
    #[serde(default)]
    pub contact: DriverContact,
}

impl DriverDetails {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            title: None,
            address: DriverAddress::default(),
            contact: DriverContact::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Repairing garage and the repair timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repairer_name: Option<String>,
    #[serde(default)]
    pub contact: RepairerContact,
    #[serde(default)]
    pub repair_timeline: RepairTimeline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairerContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairTimeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_in_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_estimate_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_in: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_received_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorised_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub authorised_amounts: AuthorisedAmounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary_authorised_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary_authorised_amounts: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementary_reason: Option<String>,
    /// Number of days the repair is expected to take
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_repair_days: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_completion_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_estimated_completion_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_completion_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_out: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_received_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_approved_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_rejected_reasons: Option<String>,
}

/// Amounts authorised for the repair, by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorisedAmounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labour: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paint_and_materials: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialist: Option<Decimal>,
}

/// Salvage handling for total-loss vehicles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalvageDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_agent_name: Option<String>,
    #[serde(default)]
    pub contact: SalvageContact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_instructed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_collected_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_cleared_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_value_paid: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_value_received: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalvageContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Net, VAT and gross parts of one charge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross: Option<Decimal>,
}

/// Storage and recovery charge, which also carries the provider reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAndRecovery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross: Option<Decimal>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDetails {
    #[serde(default)]
    pub repair_cost: ChargeBreakdown,
    #[serde(default)]
    pub total_loss_fee: ChargeBreakdown,
    #[serde(default)]
    pub storage_and_recovery: StorageAndRecovery,
    #[serde(default)]
    pub engineers_fee: ChargeBreakdown,
    #[serde(default)]
    pub delivery_and_collection: ChargeBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excess: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_excess: Option<Decimal>,
    /// Pre-accident value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pav: Option<Decimal>,
    /// Pre-accident value paid by the third-party insurer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpi_pav_payment: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_value_paid: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salvage_value_received: Option<Decimal>,
}

/// Workflow status and scheme flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    #[validate(length(min = 1))]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clsp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cd_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underpinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_vehicle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_company_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subrogated: Option<bool>,
}

impl StatusDetails {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            clsp: None,
            billing_status: None,
            cd_status: None,
            fault: None,
            underpinned: None,
            replacement_vehicle: None,
            scheme_name: None,
            scheme_company_reference: None,
            subrogated: None,
        }
    }
}

/// Key dates in the total-loss process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tl_date: Option<DateTime<Utc>>,
    #[serde(rename = "tLCallDate", skip_serializing_if = "Option::is_none")]
    pub tl_call_date: Option<DateTime<Utc>>,
    #[serde(rename = "tLChaseDates", skip_serializing_if = "Option::is_none")]
    pub tl_chase_dates: Option<Vec<DateTime<Utc>>>,
    #[serde(rename = "v5CReceivedDate", skip_serializing_if = "Option::is_none")]
    pub v5c_received_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mot_received_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_letter_received_date: Option<DateTime<Utc>>,
    #[serde(rename = "packSubmittedToTPIDate", skip_serializing_if = "Option::is_none")]
    pub pack_submitted_to_tpi_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_received_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_retaining: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_delay_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_dispute_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpi_pav_payment_chase_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn minimal_record() -> ClaimRecord {
        ClaimRecord {
            company_reference: "REF123".to_string(),
            policy_number: "POL123".to_string(),
            partner_ref: "PARTNER1".to_string(),
            incident_details: IncidentDetails::new(
                Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            ),
            vehicle_details: VehicleDetails::new("AB12 CDE"),
            third_party_details: ThirdPartyDetails::default(),
            driver_details: DriverDetails::new("Jane", "Doe"),
            repairer_details: RepairerDetails::default(),
            salvage_details: SalvageDetails::default(),
            financial_details: FinancialDetails::default(),
            status_details: StatusDetails::new("Open"),
            timestamps: Timestamps::default(),
            notes: Notes::default(),
        }
    }

    #[test]
    fn test_check_required_passes() {
        assert!(minimal_record().check_required().is_ok());
    }

    #[test]
    fn test_check_required_names_nested_field() {
        let mut record = minimal_record();
        record.driver_details.last_name = String::new();

        let err = record.check_required().unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("driverDetails.lastName".to_string()));
    }

    #[test]
    fn test_check_required_top_level_field() {
        let mut record = minimal_record();
        record.partner_ref = String::new();

        let err = record.check_required().unwrap_err();
        assert_eq!(err.field(), Some("partnerRef"));
    }

    #[test]
    fn test_check_required_follows_column_order() {
        let mut record = minimal_record();
        record.partner_ref = String::new();
        record.policy_number = String::new();
        record.status_details.status = String::new();

        let err = record.check_required().unwrap_err();
        assert_eq!(err.field(), Some("policyNumber"));
    }

    #[test]
    fn test_serialization_uses_document_keys() {
        let mut record = minimal_record();
        record.timestamps.tl_call_date = Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        record.timestamps.pack_submitted_to_tpi_date =
            Some(Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap());
        record.third_party_details.reference = Some("TP-9".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["timestamps"].get("tLCallDate").is_some());
        assert!(json["timestamps"].get("packSubmittedToTPIDate").is_some());
        assert_eq!(json["thirdPartyDetails"]["ref"], "TP-9");
        assert_eq!(json["driverDetails"]["firstName"], "Jane");
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let json = serde_json::to_value(minimal_record()).unwrap();
        assert!(json["vehicleDetails"].get("make").is_none());
        assert!(json["statusDetails"].get("underpinned").is_none());
        assert!(json["financialDetails"]["repairCost"].get("net").is_none());
    }

    #[test]
    fn test_stored_claim_flattens_with_id() {
        let id: ClaimId = "67c5ebefd0a6b39a8f7391ec".parse().unwrap();
        let stored = StoredClaim::new(id, minimal_record());

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["_id"], "67c5ebefd0a6b39a8f7391ec");
        assert_eq!(json["companyReference"], "REF123");

        let back: StoredClaim = serde_json::from_value(json).unwrap();
        assert_eq!(back, stored);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("driver_details"), "driverDetails");
        assert_eq!(camel_case("status"), "status");
    }
}
