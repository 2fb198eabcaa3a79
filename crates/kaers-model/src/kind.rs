//! Recognized KAERS extract table kinds.
//!
//! Every uploaded file is matched by exact base name against this set; the
//! enum order is also the sheet order in the submission workbook.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A logical table of the KAERS case-reporting extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Case demographics (one row per case version).
    Demo,
    /// Medical history entries.
    HistE,
    /// Parent information for parent-child reports.
    Parent,
    /// Adverse events.
    Event,
    /// Lab test results.
    Test,
    /// Suspected/concomitant drugs.
    Drug,
    /// Drug ingredients.
    Drug1,
    /// Drug dosage details.
    Drug2,
    /// Drug dosage periods.
    Drug3,
    /// Drug-event rechallenge links.
    DrugEvent,
    /// Causality assessments, keyed by (case, drug sequence).
    Assessment,
    /// Case grouping: (case, group id, sequence number).
    Group,
}

impl TableKind {
    /// All kinds in workbook sheet order.
    pub const ALL: [TableKind; 12] = [
        TableKind::Demo,
        TableKind::HistE,
        TableKind::Parent,
        TableKind::Event,
        TableKind::Test,
        TableKind::Drug,
        TableKind::Drug1,
        TableKind::Drug2,
        TableKind::Drug3,
        TableKind::DrugEvent,
        TableKind::Assessment,
        TableKind::Group,
    ];

    /// The extract file base name (and sheet name) for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Demo => "DEMO",
            TableKind::HistE => "HIST_E",
            TableKind::Parent => "PARENT",
            TableKind::Event => "EVENT",
            TableKind::Test => "TEST",
            TableKind::Drug => "DRUG",
            TableKind::Drug1 => "DRUG1",
            TableKind::Drug2 => "DRUG2",
            TableKind::Drug3 => "DRUG3",
            TableKind::DrugEvent => "DRUG_EVENT",
            TableKind::Assessment => "ASSESSMENT",
            TableKind::Group => "GROUP",
        }
    }

    /// Match a file base name (without extension) to a kind.
    ///
    /// Matching is exact, including case; anything else is not a recognized
    /// extract file.
    pub fn from_base_name(name: &str) -> Option<TableKind> {
        TableKind::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }

    /// Position in the fixed sheet order.
    pub fn sort_order(&self) -> usize {
        TableKind::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or(TableKind::ALL.len())
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = crate::error::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableKind::from_base_name(s)
            .ok_or_else(|| crate::error::ModelError::Message(format!("unknown table kind: {s}")))
    }
}
