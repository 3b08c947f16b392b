//! Test Data Generators
//!
//! Fake data for realistic-looking claims.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::address::en::PostCode;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;

use domain_claims::{ClaimRecord, SpreadsheetRow};

use crate::builders::ClaimRecordBuilder;

const STATUSES: &[&str] = &["Open", "In Repair", "Total Loss", "Settled", "Closed"];
const MAKES: &[&str] = &["Ford", "Vauxhall", "Volkswagen", "Toyota", "BMW", "Nissan"];

/// A random UK-style registration such as "AB12 CDE"
pub fn fake_registration() -> String {
    let letter = || (b'A' + (0..26u8).fake::<u8>()) as char;
    format!(
        "{}{}{:02} {}{}{}",
        letter(),
        letter(),
        (1..75u8).fake::<u8>(),
        letter(),
        letter(),
        letter()
    )
}

fn pick(values: &[&str]) -> String {
    values[(0..values.len()).fake::<usize>()].to_string()
}

fn fake_date() -> DateTime<Utc> {
    let base = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    base + Duration::days((0..1000i64).fake::<i64>())
}

/// A spreadsheet row with the required columns and a few optional ones
pub fn fake_claim_row() -> SpreadsheetRow {
    SpreadsheetRow::new()
        .with("CompanyReference", format!("CR-{}", (100_000..999_999u32).fake::<u32>()))
        .with("PolicyNumber", format!("POL-{}", (100_000..999_999u32).fake::<u32>()))
        .with("PartnerRef", CompanyName().fake::<String>())
        .with("IncidentDate", fake_date().format("%Y-%m-%d").to_string())
        .with("RegistrationNumber", fake_registration())
        .with("Driver_FirstName", FirstName().fake::<String>())
        .with("Driver_LastName", LastName().fake::<String>())
        .with("Status", pick(STATUSES))
        .with("MAKE", pick(MAKES))
        .with("Driver_Address_Postcode", PostCode().fake::<String>())
        .with("Driver_Contact_Email", FreeEmail().fake::<String>())
        .with("PAV", (1_000..40_000u32).fake::<u32>() as f64)
}

/// A fully valid claim record with randomised required fields
pub fn fake_claim_record() -> ClaimRecord {
    ClaimRecordBuilder::new()
        .with_company_reference(format!("CR-{}", (100_000..999_999u32).fake::<u32>()))
        .with_policy_number(format!("POL-{}", (100_000..999_999u32).fake::<u32>()))
        .with_partner_ref(CompanyName().fake::<String>())
        .with_incident_date(fake_date())
        .with_registration(fake_registration())
        .with_driver(FirstName().fake::<String>(), LastName().fake::<String>())
        .with_status(pick(STATUSES))
        .with_make(pick(MAKES))
        .with_pav(Decimal::from((1_000..40_000u32).fake::<u32>()))
        .build()
}
