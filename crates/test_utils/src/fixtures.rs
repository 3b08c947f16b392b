//! Pre-built Test Fixtures
//!
//! Consistent, predictable claim data for integration tests.

use chrono::{DateTime, TimeZone, Utc};

use domain_claims::{Cell, SpreadsheetRow};

/// Fixture data for claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    pub const COMPANY_REFERENCE: &'static str = "CR-100234";
    pub const POLICY_NUMBER: &'static str = "POL-778812";
    pub const PARTNER_REF: &'static str = "PARTNER-07";
    pub const REGISTRATION: &'static str = "AB12 CDE";
    pub const FIRST_NAME: &'static str = "Jane";
    pub const LAST_NAME: &'static str = "Doe";
    pub const STATUS: &'static str = "Open";

    /// A well-formed identifier no claim will ever be assigned
    pub const UNUSED_ID: &'static str = "000000000000000000000000";

    pub fn incident_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
    }

    /// A row holding exactly the eight required columns
    pub fn required_row() -> SpreadsheetRow {
        SpreadsheetRow::new()
            .with("CompanyReference", Self::COMPANY_REFERENCE)
            .with("PolicyNumber", Self::POLICY_NUMBER)
            .with("PartnerRef", Self::PARTNER_REF)
            .with("IncidentDate", "2024-03-05")
            .with("RegistrationNumber", Self::REGISTRATION)
            .with("Driver_FirstName", Self::FIRST_NAME)
            .with("Driver_LastName", Self::LAST_NAME)
            .with("Status", Self::STATUS)
    }

    /// A row touching every sub-structure
    pub fn full_row() -> SpreadsheetRow {
        Self::required_row()
            .with("MAKE", "Ford")
            .with("MODEL", "Focus")
            .with("ThirdPartyInsurer", "Acme Mutual")
            .with("Driver_Address_Postcode", "LS1 4AP")
            .with("Driver_Contact_Email", "jane.doe@example.com")
            .with("RepairerName", "Northside Bodyshop")
            .with("AuthorisedPartsAmount", 845.2)
            .with("DateIn", "12/03/2024")
            .with("SalvageCategory", "N")
            .with("SalvageValuePaid", 1250.0)
            .with("Repair Cost Net", 1000.0)
            .with("Repair Cost Vat", 200.0)
            .with("Repair Cost Gross", 1200.0)
            .with("Storage and Recovery Ref", "SR-5531")
            .with("PAV", 6400.0)
            .with("Underpinned", "Yes")
            .with("Replacement Vehicle", "No")
            .with("TLChaseDates", "2024-04-01, 2024-04-08")
            .with("CustomerRetaining", "Yes")
            .with("RepairDelayNotes", "Awaiting parts")
            .with("UnmappedColumn", Cell::from("ignored"))
    }
}
