//! Per-kind transform rules as declarative tables.
//!
//! Each recognized table kind carries a fixed rule set applied in a
//! documented order: column deletes (against the raw header), header
//! renames, coded-value translations (by renamed column name), then derived
//! column inserts. Rename targets never appear as rename sources, so
//! applying a rule set to its own output leaves the header unchanged.

use kaers_codes::{FileTable, StaticMap};
use kaers_model::TableKind;

/// Where a column's translated values come from.
#[derive(Debug, Clone, Copy)]
pub enum ValueSource {
    /// In-crate fixed coded-value map.
    Static(StaticMap),
    /// File-loaded reference vocabulary.
    File(FileTable),
}

/// How a derived column's per-row value is computed.
#[derive(Debug, Clone, Copy)]
pub enum Derive {
    /// WHO-ART English term from the two-part (record number, sequence) key;
    /// empty when either part is empty or the key is unknown.
    WhoartEnglish {
        record_col: &'static str,
        seq_col: &'static str,
    },
    /// "Y" when any named column holds a non-empty value, else "N".
    AnyNonEmpty { columns: &'static [&'static str] },
}

/// A structural header edit anchored to a named column.
///
/// Anchors are re-resolved against the current header state when the op
/// runs, so earlier inserts and deletes cannot skew positions. A missing
/// anchor means the op is skipped, never an error.
#[derive(Debug, Clone, Copy)]
pub enum HeaderOp {
    InsertAfter {
        anchor: &'static str,
        column: &'static str,
        derive: Derive,
    },
    InsertBefore {
        anchor: &'static str,
        column: &'static str,
        derive: Derive,
    },
}

/// The complete rule set for one table kind.
#[derive(Debug, Clone, Copy)]
pub struct SheetRules {
    pub deletes: &'static [&'static str],
    pub renames: &'static [(&'static str, &'static str)],
    pub translations: &'static [(&'static str, ValueSource)],
    pub inserts: &'static [HeaderOp],
}

const DEMO_RULES: SheetRules = SheetRules {
    // Internal MFDS classification column, not part of the submission layout
    deletes: &["ADRSE_CLS_CD"],
    renames: &[
        ("DEPT_RECEIPT_NO", "MFDS_RECEIPT_NO"),
        ("SFRPNO", "MANUF_CASE_NO"),
        ("RPT_DL_DT", "SUBMISSION DATE TO CA"),
        ("RPT_TY", "REPORT_TYPE"),
        ("ADRSE_STUDY_TYP", "STUDY_TYPE"),
        ("ADRSE_STUDY_LWPRT_TYP", "STUDY TYPE_DETAIL"),
        ("LTRTRE_INFO", "LITERATURE_INFO"),
        ("CLIENT_STUDY_NO", "STUDY_PROTOCOL_NO"),
        ("FIRST_OCCR_DT", "INITIAL_RECEIPT_DATE"),
        ("RECENT_OCCR_DT", "RECENT_RECEIPT_DATE"),
        ("QCK_RPT_YN", "EXPEDITED"),
        ("SFRPNO_2", "CASE_NO_OF_REFERENCE_REPORT"),
        ("REPRT_CHANGE_CD", "NULLIFICATION_AMENDMENT"),
        ("PRMRPT_TY", "PRIMARY_REPORTER"),
        ("PRMRPT_LWPRT_CD", "PRIMARY_REPORTER_OTHER_HCP"),
        ("SENDER_TY", "SENDER_TYPE"),
        ("SENDER_TY_MED_EXPERT", "SENDER_TYPE_HCP DETAIL"),
        ("PTNT_OCCURSYMT_AGE", "PATIENT AGE AT OCCURRENCE"),
        ("PTNT_OCCURSYMT_AGE_UNIT", "PATIENT AGE AT OCCURRENCE_UNIT"),
        ("PTNT_AGRDE", "PATIENT AGE GROUP"),
        ("PTNT_BRTYR_YYYY", "PATIENT BIRTH YEAR"),
        ("PTNT_SEX", "PATIENT SEX"),
        ("PTNT_WEIGHT", "PATIENT WEIGHT"),
        ("PTNT_HEIGHT", "PATIENT HEIGHT"),
        ("OCCURSYMT_PREG_TRM", "PREGNANCY_TERM_OCCURRENCE"),
        ("OCCURSYMT_PREG_TRM_UNIT", "PREGNANCY_TERM_OCCURRENCE_UNIT"),
    ],
    translations: &[
        ("REPORT_TYPE", ValueSource::Static(StaticMap::ReportType)),
        ("STUDY_TYPE", ValueSource::Static(StaticMap::StudyType)),
        (
            "STUDY TYPE_DETAIL",
            ValueSource::Static(StaticMap::StudyTypeDetail),
        ),
        (
            "NULLIFICATION_AMENDMENT",
            ValueSource::Static(StaticMap::NullificationAmendment),
        ),
        (
            "PRIMARY_REPORTER",
            ValueSource::Static(StaticMap::PrimaryReporter),
        ),
        (
            "PRIMARY_REPORTER_OTHER_HCP",
            ValueSource::Static(StaticMap::PrimaryReporterOtherHcp),
        ),
        ("SENDER_TYPE", ValueSource::Static(StaticMap::SenderType)),
        (
            "SENDER_TYPE_HCP DETAIL",
            ValueSource::Static(StaticMap::SenderTypeHcpDetail),
        ),
        (
            "PATIENT AGE AT OCCURRENCE_UNIT",
            ValueSource::Static(StaticMap::PatientAgeUnit),
        ),
        (
            "PATIENT AGE GROUP",
            ValueSource::Static(StaticMap::PatientAgeGroup),
        ),
        ("PATIENT SEX", ValueSource::Static(StaticMap::PatientSex)),
        (
            "PREGNANCY_TERM_OCCURRENCE_UNIT",
            ValueSource::Static(StaticMap::PregnancyTermUnit),
        ),
    ],
    inserts: &[],
};

const HIST_E_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("DISS_CD", "DISEASE_CODE"), ("DISS_NM", "DISEASE_NAME")],
    translations: &[("DISEASE_CODE", ValueSource::File(FileTable::DiseaseCode))],
    inserts: &[],
};

const PARENT_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("PARENT_SEX_CD", "PARENT_SEX")],
    translations: &[
        ("PARENT_SEX", ValueSource::Static(StaticMap::PatientSex)),
        (
            "PARENT_AGE_UNIT",
            ValueSource::Static(StaticMap::PregnancyTermUnit),
        ),
    ],
    inserts: &[],
};

/// Boolean "serious criteria" columns of the EVENT table, renamed form.
pub const SERIOUS_CRITERIA: &[&str] = &[
    "SER_DEATH",
    "SER_LIFE_THREAT",
    "SER_HOSPITALIZATION",
    "SER_DISABILITY",
    "SER_ANOMALY",
    "SER_MEDICALLY IMPORTANT",
];

const EVENT_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[
        ("ADR_MEDDRA_KOR_NM", "ADR_MEDDRA_KOR"),
        ("ADR_MEDDRA_ENG_NM", "ADR_MEDDRA_ENG"),
        ("ADR_START_DT", "ADR_START_DATE"),
        ("ADR_END_DT", "ADR_END_DATE"),
        ("ADR_RESULT_CODE", "ADR_OUTCOME"),
        ("CLNIC_FACT_CONFIRM_YN", "MEDICALLY_CONFIRMED"),
        ("WHOART_ARRN", "WHOART_PT"),
        ("WHOART_SEQ", "WHOART_IT"),
        ("SE_DEATH", "SER_DEATH"),
        ("SE_LIFE_MENACE", "SER_LIFE_THREAT"),
        ("SE_HSPTLZ_EXTN", "SER_HOSPITALIZATION"),
        ("SE_FNCT_DGRD", "SER_DISABILITY"),
        ("SE_ANMLY", "SER_ANOMALY"),
        ("SE_ETC_IMPRTNC_SITTN", "SER_MEDICALLY IMPORTANT"),
    ],
    translations: &[("ADR_OUTCOME", ValueSource::Static(StaticMap::AdrOutcome))],
    inserts: &[
        HeaderOp::InsertAfter {
            anchor: "WHOART_IT",
            column: "WHOART_TERM_ENG",
            derive: Derive::WhoartEnglish {
                record_col: "WHOART_PT",
                seq_col: "WHOART_IT",
            },
        },
        HeaderOp::InsertBefore {
            anchor: "SER_DEATH",
            column: "SERIOUS",
            derive: Derive::AnyNonEmpty {
                columns: SERIOUS_CRITERIA,
            },
        },
    ],
};

const TEST_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[
        ("EXAM_NM", "TEST_NAME"),
        ("EXAM_DT", "TEST_DATE"),
        ("EXAM_RSLT", "TEST_RESULT"),
        ("EXAM_RSLT_UNIT", "TEST_RESULT_UNIT"),
    ],
    translations: &[("TEST_RESULT_UNIT", ValueSource::File(FileTable::DosageUnit))],
    inserts: &[],
};

const DRUG_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[
        ("DRUG_GB", "DRUG_GROUP"),
        ("DRUG_CD", "DRUG_CODE"),
        ("ACCMLT_DOSAGE_QTY", "ACCUMULATE_DOSAGE_SINCE_ONSET"),
        ("ACCMLT_DOSAGE_QTY_UNIT", "ACCUMULATE_DOSAGE_SINCE_ONSET_UNIT"),
        ("DRUG_ACTION", "DRUG_ACTION_TAKEN"),
    ],
    translations: &[
        ("DRUG_GROUP", ValueSource::Static(StaticMap::DrugGroup)),
        ("DRUG_CODE", ValueSource::File(FileTable::DrugCode)),
        (
            "ACCUMULATE_DOSAGE_SINCE_ONSET_UNIT",
            ValueSource::File(FileTable::DosageUnit),
        ),
    ],
    inserts: &[],
};

const DRUG1_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("INGR_CD", "INGREDIENT_CODE"), ("INGR_NM", "INGREDIENT_NAME")],
    translations: &[(
        "INGREDIENT_CODE",
        ValueSource::File(FileTable::IngredientCode),
    )],
    inserts: &[],
};

const DRUG2_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[
        ("DOSAGE_QTY_UNIT", "DOSAGE_UNIT"),
        ("DOSAGE_ROUTE_CD", "DOSAGE_ROUTE"),
        ("DOSAGE_SHAPE_CD", "DOSAGE_SHAPE"),
    ],
    translations: &[
        ("DOSAGE_UNIT", ValueSource::File(FileTable::DosageUnit)),
        ("DOSAGE_ROUTE", ValueSource::File(FileTable::RouteShape)),
        ("DOSAGE_SHAPE", ValueSource::File(FileTable::RouteShape)),
    ],
    inserts: &[],
};

const DRUG3_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("DOSAGE_PRD_UNIT", "DOSAGE_PERIOD_UNIT")],
    translations: &[(
        "DOSAGE_PERIOD_UNIT",
        ValueSource::File(FileTable::DosageUnit),
    )],
    inserts: &[],
};

const DRUG_EVENT_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("RE_DOSAGE_ALLERGY_YN", "RECHALLENGE_ADR_REOCCUR")],
    translations: &[(
        "RECHALLENGE_ADR_REOCCUR",
        ValueSource::Static(StaticMap::Rechallenge),
    )],
    inserts: &[],
};

const ASSESSMENT_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("EVALT_RESULT_CODE", "CAUSALITY_ASSESSMENT")],
    translations: &[(
        "CAUSALITY_ASSESSMENT",
        ValueSource::Static(StaticMap::CausalityAssessment),
    )],
    inserts: &[],
};

const GROUP_RULES: SheetRules = SheetRules {
    deletes: &[],
    renames: &[("RPT_GRP_ID", "GROUP_ID"), ("RPT_SEQ", "GROUP_SEQ")],
    translations: &[],
    inserts: &[],
};

/// The rule set for a table kind.
pub fn rules_for(kind: TableKind) -> &'static SheetRules {
    match kind {
        TableKind::Demo => &DEMO_RULES,
        TableKind::HistE => &HIST_E_RULES,
        TableKind::Parent => &PARENT_RULES,
        TableKind::Event => &EVENT_RULES,
        TableKind::Test => &TEST_RULES,
        TableKind::Drug => &DRUG_RULES,
        TableKind::Drug1 => &DRUG1_RULES,
        TableKind::Drug2 => &DRUG2_RULES,
        TableKind::Drug3 => &DRUG3_RULES,
        TableKind::DrugEvent => &DRUG_EVENT_RULES,
        TableKind::Assessment => &ASSESSMENT_RULES,
        TableKind::Group => &GROUP_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_targets_are_never_sources() {
        for kind in TableKind::ALL {
            let rules = rules_for(kind);
            for (_, target) in rules.renames {
                assert!(
                    !rules.renames.iter().any(|(source, _)| source == target),
                    "{kind}: rename target {target} is also a source"
                );
            }
        }
    }

    #[test]
    fn translations_refer_to_renamed_or_passthrough_columns() {
        for kind in TableKind::ALL {
            let rules = rules_for(kind);
            for (column, _) in rules.translations {
                assert!(
                    !rules.renames.iter().any(|(source, _)| source == column),
                    "{kind}: translation column {column} uses a pre-rename name"
                );
            }
        }
    }
}
