//! Clinical evidence attached to drivers and characteristics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Evidence level, A being the strongest (approved therapy) and D preclinical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvidenceLevel {
    A,
    B,
    C,
    D,
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvidenceLevel::A => "A",
            EvidenceLevel::B => "B",
            EvidenceLevel::C => "C",
            EvidenceLevel::D => "D",
        };
        write!(f, "{}", s)
    }
}

/// Whether the evidence predicts response or resistance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceDirection {
    Responsive,
    Resistant,
}

/// One treatment linked to a molecular event
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreatmentEvidence {
    pub evidence_level: EvidenceLevel,
    pub treatment: String,
    pub direction: EvidenceDirection,
    /// The curated event that matched (e.g., "BRAF V600E")
    pub source_event: String,
}

/// All evidence for one driver or characteristic, kept sorted
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClinicalEvidence {
    pub treatment_evidence: Vec<TreatmentEvidence>,
}

impl ClinicalEvidence {
    /// Build evidence from unsorted matches, sorting by (level, treatment) and
    /// dropping duplicates.
    pub fn from_matches(mut matches: Vec<TreatmentEvidence>) -> Self {
        matches.sort();
        matches.dedup();
        Self {
            treatment_evidence: matches,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.treatment_evidence.is_empty()
    }

    /// Whether any evidence predicts resistance
    pub fn has_resistance(&self) -> bool {
        self.treatment_evidence
            .iter()
            .any(|e| e.direction == EvidenceDirection::Resistant)
    }
}
