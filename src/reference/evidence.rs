//! Actionable events with their treatments.
//!
//! Loaded from a JSON list:
//!
//! ```json
//! [
//!   {"rule": {"type": "HOTSPOT", "gene": "BRAF", "protein_impact": "p.V600E"},
//!    "treatment": "Vemurafenib", "evidence_level": "A", "direction": "RESPONSIVE"},
//!   {"rule": {"type": "TUMOR_MUTATIONAL_BURDEN_HIGH"},
//!    "treatment": "Pembrolizumab", "evidence_level": "A", "direction": "RESPONSIVE"}
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PanelError;
use crate::hgvs::protein::{protein_event, to_single_letter};
use crate::model::{EvidenceDirection, EvidenceLevel, TreatmentEvidence, VirusType};

/// What an actionable event applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceRule {
    /// A specific protein change
    Hotspot { gene: String, protein_impact: String },
    /// Any protein-altering variant in the gene
    GeneMutation { gene: String },
    Amplification { gene: String },
    Deletion { gene: String },
    /// A specific fusion pair, in orientation
    FusionPair { gene_up: String, gene_down: String },
    /// Any fusion involving the gene
    PromiscuousFusion { gene: String },
    Virus { virus_type: VirusType },
    MicrosatelliteUnstable,
    TumorMutationalBurdenHigh,
    HomologousRecombinationDeficient,
}

impl EvidenceRule {
    /// Human-readable event the rule describes (e.g., "BRAF V600E")
    pub fn event(&self) -> String {
        match self {
            EvidenceRule::Hotspot {
                gene,
                protein_impact,
            } => {
                let short = to_single_letter(protein_impact);
                match protein_event(&short) {
                    Some(change) => format!("{} {}", gene, change),
                    None => format!("{} {}", gene, short),
                }
            }
            EvidenceRule::GeneMutation { gene } => format!("{} mutation", gene),
            EvidenceRule::Amplification { gene } => format!("{} amp", gene),
            EvidenceRule::Deletion { gene } => format!("{} del", gene),
            EvidenceRule::FusionPair { gene_up, gene_down } => {
                format!("{}::{} fusion", gene_up, gene_down)
            }
            EvidenceRule::PromiscuousFusion { gene } => format!("{} fusion", gene),
            EvidenceRule::Virus { virus_type } => format!("{} positive", virus_type),
            EvidenceRule::MicrosatelliteUnstable => "MSI".to_string(),
            EvidenceRule::TumorMutationalBurdenHigh => "TMB high".to_string(),
            EvidenceRule::HomologousRecombinationDeficient => "HRD".to_string(),
        }
    }
}

/// One actionable event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionableEvent {
    pub rule: EvidenceRule,
    pub treatment: String,
    pub evidence_level: EvidenceLevel,
    pub direction: EvidenceDirection,
}

impl ActionableEvent {
    /// The evidence this event contributes when it matches
    pub fn to_evidence(&self) -> TreatmentEvidence {
        TreatmentEvidence {
            evidence_level: self.evidence_level,
            treatment: self.treatment.clone(),
            direction: self.direction,
            source_event: self.rule.event(),
        }
    }
}

/// All actionable events
#[derive(Debug, Clone, Default)]
pub struct EvidenceDatabase {
    events: Vec<ActionableEvent>,
}

impl EvidenceDatabase {
    pub fn new(events: Vec<ActionableEvent>) -> Self {
        Self { events }
    }

    /// Load from a JSON file
    pub fn from_json(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, PanelError> {
        let events: Vec<ActionableEvent> = serde_json::from_str(content)?;
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[ActionableEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
