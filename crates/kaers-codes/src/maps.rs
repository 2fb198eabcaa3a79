//! Static coded-value maps for the KAERS extract.
//!
//! Each map translates a small fixed code set to its English submission
//! label. Lookups never fail: an unmapped code passes through unchanged, so
//! translation can only degrade, never lose data.

use std::fmt;

const REPORT_TYPE: &[(&str, &str)] = &[
    ("1", "Spontaneous"),
    ("2", "Clinical trial/study"),
    ("3", "Others"),
];

const STUDY_TYPE: &[(&str, &str)] = &[
    ("1", "Clinical trial"),
    ("2", "Individual patient use"),
    ("3", "Other study"),
];

const STUDY_TYPE_DETAIL: &[(&str, &str)] = &[
    ("1", "Re-examination-Post-marketing surveillance"),
    ("2", "Re-examination-Post-marketing clinical study"),
    ("3", "Re-examination-Special investigation"),
    ("4", "Others"),
];

const NULLIFICATION_AMENDMENT: &[(&str, &str)] = &[("1", "Delete"), ("2", "Amendment")];

const PRIMARY_REPORTER: &[(&str, &str)] = &[
    ("1", "Doctor, Dentist, Oriental doctor"),
    ("2", "Pharmacist, Herbal pharmacist"),
    ("3", "Other HCP"),
    ("4", "Lawyer"),
    ("5", "Consumer or other non-HCP"),
    ("UNK", "Unknown"),
];

const PRIMARY_REPORTER_OTHER_HCP: &[(&str, &str)] = &[("1", "Nurse"), ("2", "Others")];

const SENDER_TYPE: &[(&str, &str)] = &[
    ("1", "Pharmaceutical company"),
    ("2", "Competent authority"),
    ("3", "HCP"),
    ("4", "Regional pharmacovigilance center"),
    ("5", "WHO Uppsala Monitoring Centre"),
    ("6", "Others(eg. Distributor or other organization)"),
    ("7", "Patient/consumer"),
];

const SENDER_TYPE_HCP_DETAIL: &[(&str, &str)] = &[
    ("1", "Hospital"),
    ("2", "Pharmacy"),
    ("3", "Public health center"),
    ("4", "Others"),
];

const PATIENT_AGE_UNIT: &[(&str, &str)] = &[
    ("00105", "hours"),
    ("00107", "days"),
    ("00108", "weeks"),
    ("00106", "months"),
    ("00103", "years"),
    ("00009", "decades"),
];

const PATIENT_AGE_GROUP: &[(&str, &str)] = &[
    ("0", "fetus"),
    ("1", "newborn(birth date~less than 28days)"),
    ("2", "infant(28days~less than 24 months)"),
    ("3", "children(24months~less than 12  years old)"),
    ("4", "adolescent(12 years~less than 19 years old)"),
    ("5", "adult(19 years~less than 65 years old)"),
    ("6", "geriatrics(more than 65 years old)"),
];

const PATIENT_SEX: &[(&str, &str)] = &[("1", "male"), ("2", "female")];

const PREGNANCY_TERM_UNIT: &[(&str, &str)] = &[
    ("00109", "seconds"),
    ("00104", "minutes"),
    ("00105", "hours"),
    ("00107", "days"),
    ("00108", "weeks"),
    ("00106", "months"),
    ("00103", "years"),
    ("00009", "decades"),
    ("00010", "trimester"),
    ("00011", "periodically"),
    ("00012", "if necessary"),
    ("00013", "total"),
];

const ADR_OUTCOME: &[(&str, &str)] = &[
    ("1", "resolved"),
    ("2", "resolving"),
    ("3", "not resolved"),
    ("4", "resolved with sequelae"),
    ("5", "death due to AE/ADR"),
    ("0", "unknown"),
];

const DRUG_GROUP: &[(&str, &str)] = &[
    ("1", "Suspected drug"),
    ("2", "Concomitant drug"),
    ("3", "Drug Interaction"),
    ("4", "Not administered"),
];

const RECHALLENGE: &[(&str, &str)] = &[
    ("1", "Rechallenged, AE reoccurred"),
    ("2", "Rechallenged, AE did not reoccur"),
    ("3", "Rechallenged, results unknown"),
    ("4", "Rechallenge not done"),
];

const CAUSALITY_ASSESSMENT: &[(&str, &str)] = &[
    ("1", "Certain"),
    ("2", "Probable"),
    ("3", "Possible"),
    ("4", "Unlikely"),
    ("5", "Conditional/Unclassified"),
    ("6", "Unassessable/Unclassifiable"),
    ("7", "Not applicable"),
];

/// A fixed coded-value map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StaticMap {
    ReportType,
    StudyType,
    StudyTypeDetail,
    NullificationAmendment,
    PrimaryReporter,
    PrimaryReporterOtherHcp,
    SenderType,
    SenderTypeHcpDetail,
    PatientAgeUnit,
    PatientAgeGroup,
    PatientSex,
    PregnancyTermUnit,
    AdrOutcome,
    DrugGroup,
    Rechallenge,
    CausalityAssessment,
}

impl StaticMap {
    /// Map identifier, used in logs and per-kind transform rules.
    pub fn id(&self) -> &'static str {
        match self {
            StaticMap::ReportType => "REPORT_TYPE",
            StaticMap::StudyType => "STUDY_TYPE",
            StaticMap::StudyTypeDetail => "STUDY_TYPE_DETAIL",
            StaticMap::NullificationAmendment => "NULLIFICATION_AMENDMENT",
            StaticMap::PrimaryReporter => "PRIMARY_REPORTER",
            StaticMap::PrimaryReporterOtherHcp => "PRIMARY_REPORTER_OTHER_HCP",
            StaticMap::SenderType => "SENDER_TYPE",
            StaticMap::SenderTypeHcpDetail => "SENDER_TYPE_HCP_DETAIL",
            StaticMap::PatientAgeUnit => "PATIENT_AGE_UNIT",
            StaticMap::PatientAgeGroup => "PATIENT_AGE_GROUP",
            StaticMap::PatientSex => "PATIENT_SEX",
            StaticMap::PregnancyTermUnit => "PREGNANCY_TERM_UNIT",
            StaticMap::AdrOutcome => "ADR_OUTCOME",
            StaticMap::DrugGroup => "DRUG_GROUP",
            StaticMap::Rechallenge => "RECHALLENGE",
            StaticMap::CausalityAssessment => "CAUSALITY_ASSESSMENT",
        }
    }

    fn entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            StaticMap::ReportType => REPORT_TYPE,
            StaticMap::StudyType => STUDY_TYPE,
            StaticMap::StudyTypeDetail => STUDY_TYPE_DETAIL,
            StaticMap::NullificationAmendment => NULLIFICATION_AMENDMENT,
            StaticMap::PrimaryReporter => PRIMARY_REPORTER,
            StaticMap::PrimaryReporterOtherHcp => PRIMARY_REPORTER_OTHER_HCP,
            StaticMap::SenderType => SENDER_TYPE,
            StaticMap::SenderTypeHcpDetail => SENDER_TYPE_HCP_DETAIL,
            StaticMap::PatientAgeUnit => PATIENT_AGE_UNIT,
            StaticMap::PatientAgeGroup => PATIENT_AGE_GROUP,
            StaticMap::PatientSex => PATIENT_SEX,
            StaticMap::PregnancyTermUnit => PREGNANCY_TERM_UNIT,
            StaticMap::AdrOutcome => ADR_OUTCOME,
            StaticMap::DrugGroup => DRUG_GROUP,
            StaticMap::Rechallenge => RECHALLENGE,
            StaticMap::CausalityAssessment => CAUSALITY_ASSESSMENT,
        }
    }

    /// Translate a code to its label; unmapped codes pass through unchanged.
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        self.entries()
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, label)| *label)
            .unwrap_or(code)
    }

    /// The label for "suspected drug" rows in the DRUG table.
    pub fn suspected_drug_label() -> &'static str {
        StaticMap::DrugGroup.resolve("1")
    }

    /// The label marking a nullified (withdrawn) case version in DEMO.
    pub fn nullification_delete_label() -> &'static str {
        StaticMap::NullificationAmendment.resolve("1")
    }
}

impl fmt::Display for StaticMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_maps_known_codes() {
        assert_eq!(StaticMap::PatientSex.resolve("1"), "male");
        assert_eq!(StaticMap::PatientSex.resolve("2"), "female");
        assert_eq!(StaticMap::CausalityAssessment.resolve("2"), "Probable");
        assert_eq!(StaticMap::PatientAgeUnit.resolve("00103"), "years");
    }

    #[test]
    fn resolve_passes_unmapped_codes_through() {
        assert_eq!(StaticMap::PatientSex.resolve("9"), "9");
        assert_eq!(StaticMap::ReportType.resolve(""), "");
        assert_eq!(StaticMap::DrugGroup.resolve("99"), "99");
    }

    #[test]
    fn sentinel_labels() {
        assert_eq!(StaticMap::suspected_drug_label(), "Suspected drug");
        assert_eq!(StaticMap::nullification_delete_label(), "Delete");
    }
}
