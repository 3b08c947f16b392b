//! Test Data Builders
//!
//! Builders let tests set only the fields they care about; everything else
//! takes the values from [`ClaimFixtures`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use domain_claims::{
    ClaimRecord, DriverDetails, IncidentDetails, StatusDetails, StoredClaim, VehicleDetails,
};
use core_kernel::ClaimId;

use crate::fixtures::ClaimFixtures;

/// Builder for constructing claim records
pub struct ClaimRecordBuilder {
    record: ClaimRecord,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a new builder with only the required fields set
    pub fn new() -> Self {
        Self {
            record: ClaimRecord {
                company_reference: ClaimFixtures::COMPANY_REFERENCE.to_string(),
                policy_number: ClaimFixtures::POLICY_NUMBER.to_string(),
                partner_ref: ClaimFixtures::PARTNER_REF.to_string(),
                incident_details: IncidentDetails::new(ClaimFixtures::incident_date()),
                vehicle_details: VehicleDetails::new(ClaimFixtures::REGISTRATION),
                third_party_details: Default::default(),
                driver_details: DriverDetails::new(ClaimFixtures::FIRST_NAME, ClaimFixtures::LAST_NAME),
                repairer_details: Default::default(),
                salvage_details: Default::default(),
                financial_details: Default::default(),
                status_details: StatusDetails::new(ClaimFixtures::STATUS),
                timestamps: Default::default(),
                notes: Default::default(),
            },
        }
    }

    pub fn with_company_reference(mut self, value: impl Into<String>) -> Self {
        self.record.company_reference = value.into();
        self
    }

    pub fn with_policy_number(mut self, value: impl Into<String>) -> Self {
        self.record.policy_number = value.into();
        self
    }

    pub fn with_partner_ref(mut self, value: impl Into<String>) -> Self {
        self.record.partner_ref = value.into();
        self
    }

    pub fn with_incident_date(mut self, date: DateTime<Utc>) -> Self {
        self.record.incident_details.incident_date = date;
        self
    }

    pub fn with_registration(mut self, value: impl Into<String>) -> Self {
        self.record.vehicle_details.registration_number = value.into();
        self
    }

    pub fn with_driver(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.record.driver_details.first_name = first.into();
        self.record.driver_details.last_name = last.into();
        self
    }

    pub fn with_status(mut self, value: impl Into<String>) -> Self {
        self.record.status_details.status = value.into();
        self
    }

    pub fn with_make(mut self, value: impl Into<String>) -> Self {
        self.record.vehicle_details.make = Some(value.into());
        self
    }

    pub fn with_pav(mut self, amount: Decimal) -> Self {
        self.record.financial_details.pav = Some(amount);
        self
    }

    /// Builds the record
    pub fn build(self) -> ClaimRecord {
        self.record
    }

    /// Builds the record as if it had been stored under a fresh identifier
    pub fn build_stored(self) -> StoredClaim {
        StoredClaim::new(ClaimId::generate(), self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_record_passes_required_check() {
        assert!(ClaimRecordBuilder::new().build().check_required().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let record = ClaimRecordBuilder::new()
            .with_company_reference("CR-1")
            .with_pav(dec!(5000))
            .with_make("Ford")
            .build();

        assert_eq!(record.company_reference, "CR-1");
        assert_eq!(record.financial_details.pav, Some(dec!(5000)));
        assert_eq!(record.vehicle_details.make.as_deref(), Some("Ford"));
    }
}
