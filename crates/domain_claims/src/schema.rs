//! Column map
//!
//! One static table ties every spreadsheet column to the dotted JSON path of
//! the claim leaf it feeds, together with the leaf's type class. The row
//! mapper reads it to build candidates and the validation gate reads it to
//! normalize them, so the two can never disagree about the record shape.

/// Type class of a claim leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    /// Boolean fed by a `"Yes"` cell
    Flag,
    /// Array of dates
    DateList,
}

impl FieldKind {
    /// Human readable name used in validation messages
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Flag => "boolean",
            FieldKind::DateList => "array of dates",
        }
    }
}

/// One source column and the leaf it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub column: &'static str,
    pub path: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl ColumnMapping {
    /// Parent groups of the target path, outermost first
    pub fn groups(&self) -> impl Iterator<Item = &'static str> {
        let path = self.path;
        path.match_indices('.').map(move |(idx, _)| &path[..idx])
    }
}

const fn text(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::Text, required: false }
}

const fn required_text(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::Text, required: true }
}

const fn number(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::Number, required: false }
}

const fn date(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::Date, required: false }
}

const fn required_date(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::Date, required: true }
}

const fn flag(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::Flag, required: false }
}

const fn dates(column: &'static str, path: &'static str) -> ColumnMapping {
    ColumnMapping { column, path, kind: FieldKind::DateList, required: false }
}

/// Every claim leaf, keyed by its source column
///
/// `SalvageValuePaid` and `SalvageValueReceived` appear twice because each
/// feeds both the salvage and the financial group. The `MOTReceviedDate` and
/// `FinanceLetterReceviedDate` headers are spelled as they appear in the
/// source workbooks.
pub static COLUMN_MAP: &[ColumnMapping] = &[
    required_text("CompanyReference", "companyReference"),
    required_text("PolicyNumber", "policyNumber"),
    required_text("PartnerRef", "partnerRef"),
    // incident
    required_date("IncidentDate", "incidentDetails.incidentDate"),
    text("AccidentCircumstances", "incidentDetails.accidentCircumstances"),
    text("DamageToVehicle", "incidentDetails.damageToVehicle"),
    text("PreExisting_Damage", "incidentDetails.preExistingDamage"),
    // vehicle
    required_text("RegistrationNumber", "vehicleDetails.registrationNumber"),
    text("MAKE", "vehicleDetails.make"),
    text("MODEL", "vehicleDetails.model"),
    text("EngineSize", "vehicleDetails.engineSize"),
    date("RegistrationDate", "vehicleDetails.registrationDate"),
    text("VehicleStatus", "vehicleDetails.vehicleStatus"),
    text("IMSVehicleStatus", "vehicleDetails.imsVehicleStatus"),
    // third party
    text("ThirdPartyInsurer", "thirdPartyDetails.insurer"),
    text("ThirdPartyRef", "thirdPartyDetails.ref"),
    text("ThirdPartyClient", "thirdPartyDetails.client"),
    text("ThirdPartyRegistration", "thirdPartyDetails.registration"),
    // driver
    required_text("Driver_FirstName", "driverDetails.firstName"),
    required_text("Driver_LastName", "driverDetails.lastName"),
    text("Driver_TitleLU", "driverDetails.title"),
    text("Driver_Address_AddressLine1", "driverDetails.address.addressLine1"),
    text("Driver_Address_Postcode", "driverDetails.address.postcode"),
    text("Driver_Contact_HomeTelephone", "driverDetails.contact.homeTelephone"),
    text("Driver_Contact_WorkTelephone", "driverDetails.contact.workTelephone"),
    text("Driver_Contact_MobileTelephone", "driverDetails.contact.mobileTelephone"),
    text("Driver_Contact_Fax", "driverDetails.contact.fax"),
    text("Driver_Contact_Email", "driverDetails.contact.email"),
    // repairer
    text("RepairerName", "repairerDetails.repairerName"),
    text("Repairer_Contact_Telephone", "repairerDetails.contact.telephone"),
    text("Repairer_Contact_MobileTelephone", "repairerDetails.contact.mobileTelephone"),
    text("Repairer_Contact_Email", "repairerDetails.contact.email"),
    text("Repairer_Contact_Fax", "repairerDetails.contact.fax"),
    date("BookingInDate", "repairerDetails.repairTimeline.bookingInDate"),
    date("MobileEstimateDate", "repairerDetails.repairTimeline.mobileEstimateDate"),
    date("DateIn", "repairerDetails.repairTimeline.dateIn"),
    date("EstimateReceivedDate", "repairerDetails.repairTimeline.estimateReceivedDate"),
    date("AuthorisedDate", "repairerDetails.repairTimeline.authorisedDate"),
    number("AuthorisedPartsAmount", "repairerDetails.repairTimeline.authorisedAmounts.parts"),
    number("AuthorisedLabourAmount", "repairerDetails.repairTimeline.authorisedAmounts.labour"),
    number(
        "AuthorisedPaintAndMaterialsAmount",
        "repairerDetails.repairTimeline.authorisedAmounts.paintAndMaterials",
    ),
    number(
        "AuthorisedSpecialistAmount",
        "repairerDetails.repairTimeline.authorisedAmounts.specialist",
    ),
    date(
        "SupplementaryAuthorisedDate",
        "repairerDetails.repairTimeline.supplementaryAuthorisedDate",
    ),
    number(
        "SupplementaryAuthorisedAmounts",
        "repairerDetails.repairTimeline.supplementaryAuthorisedAmounts",
    ),
    text("SupplementaryReason", "repairerDetails.repairTimeline.supplementaryReason"),
    number("CalculatedRepairDays", "repairerDetails.repairTimeline.calculatedRepairDays"),
    date(
        "EstimatedCompletionDate",
        "repairerDetails.repairTimeline.estimatedCompletionDate",
    ),
    date(
        "RevisedEstimatedCompletionDate",
        "repairerDetails.repairTimeline.revisedEstimatedCompletionDate",
    ),
    date("RepairCompletionDate", "repairerDetails.repairTimeline.repairCompletionDate"),
    date("DateOut", "repairerDetails.repairTimeline.dateOut"),
    date("InvoiceReceivedDate", "repairerDetails.repairTimeline.invoiceReceivedDate"),
    date("InvoiceApprovedDate", "repairerDetails.repairTimeline.invoiceApprovedDate"),
    text("InvoiceRejectedReasons", "repairerDetails.repairTimeline.invoiceRejectedReasons"),
    // salvage
    number("SalvageAmount", "salvageDetails.salvageAmount"),
    text("SalvageCategory", "salvageDetails.salvageCategory"),
    text("SalvageAgentName", "salvageDetails.salvageAgentName"),
    text("Salvage_Contact_WorkTelephone", "salvageDetails.contact.workTelephone"),
    text("Salvage_Contact_MobileTelephone", "salvageDetails.contact.mobileTelephone"),
    text("Salvage_Contact_Fax", "salvageDetails.contact.fax"),
    text("Salvage_Contact_Email", "salvageDetails.contact.email"),
    date("SalvageInstructedDate", "salvageDetails.salvageInstructedDate"),
    date("SalvageCollectedDate", "salvageDetails.salvageCollectedDate"),
    date("SalvageClearedDate", "salvageDetails.salvageClearedDate"),
    text("SalvageLotNumber", "salvageDetails.salvageLotNumber"),
    number("SalvageValuePaid", "salvageDetails.salvageValuePaid"),
    number("SalvageValueReceived", "salvageDetails.salvageValueReceived"),
    // financial
    number("Repair Cost Net", "financialDetails.repairCost.net"),
    number("Repair Cost Vat", "financialDetails.repairCost.vat"),
    number("Repair Cost Gross", "financialDetails.repairCost.gross"),
    number("Total Loss Fee Net", "financialDetails.totalLossFee.net"),
    number("Total Loss Fee Vat", "financialDetails.totalLossFee.vat"),
    number("Total Loss Fee Gross", "financialDetails.totalLossFee.gross"),
    number("Storage and Recovery Net", "financialDetails.storageAndRecovery.net"),
    number("Storage and Recovery Vat", "financialDetails.storageAndRecovery.vat"),
    number("Storage and Recovery Gross", "financialDetails.storageAndRecovery.gross"),
    text("Storage and Recovery Ref", "financialDetails.storageAndRecovery.ref"),
    number("Engineers Fee Net", "financialDetails.engineersFee.net"),
    number("Engineers Fee Vat", "financialDetails.engineersFee.vat"),
    number("Engineers Fee Gross", "financialDetails.engineersFee.gross"),
    number("Del and Col Net", "financialDetails.deliveryAndCollection.net"),
    number("Del and Col VAT", "financialDetails.deliveryAndCollection.vat"),
    number("Del and Col Gross", "financialDetails.deliveryAndCollection.gross"),
    number("Excess", "financialDetails.excess"),
    number("TotalExcess", "financialDetails.totalExcess"),
    number("PAV", "financialDetails.pav"),
    number("TPIPAVPayment", "financialDetails.tpiPavPayment"),
    number("SalvageValuePaid", "financialDetails.salvageValuePaid"),
    number("SalvageValueReceived", "financialDetails.salvageValueReceived"),
    // status
    required_text("Status", "statusDetails.status"),
    text("CLSP", "statusDetails.clsp"),
    text("Billing Status", "statusDetails.billingStatus"),
    text("CDStatus", "statusDetails.cdStatus"),
    text("Fault", "statusDetails.fault"),
    flag("Underpinned", "statusDetails.underpinned"),
    flag("Replacement Vehicle", "statusDetails.replacementVehicle"),
    text("SchemeName", "statusDetails.schemeName"),
    text("SchemeCompanyReference", "statusDetails.schemeCompanyReference"),
    flag("Subrogated", "statusDetails.subrogated"),
    // timestamps
    date("Notification Date", "timestamps.notificationDate"),
    date("TLDate", "timestamps.tlDate"),
    date("TLCallDate", "timestamps.tLCallDate"),
    dates("TLChaseDates", "timestamps.tLChaseDates"),
    date("V5CReceivedDate", "timestamps.v5CReceivedDate"),
    date("MOTReceviedDate", "timestamps.motReceivedDate"),
    date("FinanceLetterReceviedDate", "timestamps.financeLetterReceivedDate"),
    date("PackSubmittedToTPIDate", "timestamps.packSubmittedToTPIDate"),
    date("ImagesReceivedDate", "timestamps.imagesReceivedDate"),
    flag("CustomerRetaining", "timestamps.customerRetaining"),
    // notes
    text("RepairDelayNotes", "notes.repairDelayNotes"),
    text("ValuationDisputeNotes", "notes.valuationDisputeNotes"),
    text("TPIPAVPaymentChaseNotes", "notes.tpiPavPaymentChaseNotes"),
];

/// Dotted paths of the eight required leaves
pub fn required_paths() -> impl Iterator<Item = &'static str> {
    COLUMN_MAP.iter().filter(|m| m.required).map(|m| m.path)
}

/// Looks up the mapping that feeds `path`
pub fn mapping_for_path(path: &str) -> Option<&'static ColumnMapping> {
    COLUMN_MAP.iter().find(|m| m.path == path)
}

/// Mappings fed by `column`, in table order
pub fn mappings_for_column<'a>(column: &'a str) -> impl Iterator<Item = &'static ColumnMapping> + 'a {
    COLUMN_MAP.iter().filter(move |m| m.column == column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_target_paths_are_unique() {
        let paths: HashSet<_> = COLUMN_MAP.iter().map(|m| m.path).collect();
        assert_eq!(paths.len(), COLUMN_MAP.len());
    }

    #[test]
    fn test_eight_required_leaves() {
        let required: Vec<_> = required_paths().collect();
        assert_eq!(
            required,
            vec![
                "companyReference",
                "policyNumber",
                "partnerRef",
                "incidentDetails.incidentDate",
                "vehicleDetails.registrationNumber",
                "driverDetails.firstName",
                "driverDetails.lastName",
                "statusDetails.status",
            ]
        );
    }

    #[test]
    fn test_salvage_columns_feed_two_targets() {
        let targets: Vec<_> = mappings_for_column("SalvageValuePaid").map(|m| m.path).collect();
        assert_eq!(
            targets,
            vec!["salvageDetails.salvageValuePaid", "financialDetails.salvageValuePaid"]
        );
    }

    #[test]
    fn test_groups_are_outermost_first() {
        let mapping = mapping_for_path("repairerDetails.repairTimeline.authorisedAmounts.parts")
            .unwrap();
        let groups: Vec<_> = mapping.groups().collect();
        assert_eq!(
            groups,
            vec![
                "repairerDetails",
                "repairerDetails.repairTimeline",
                "repairerDetails.repairTimeline.authorisedAmounts",
            ]
        );
    }

    #[test]
    fn test_top_level_leaf_has_no_groups() {
        let mapping = mapping_for_path("policyNumber").unwrap();
        assert_eq!(mapping.groups().count(), 0);
    }
}
