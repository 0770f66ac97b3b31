//! Curated gene knowledge base.
//!
//! Provides gene roles, known hotspots and curated copy-number and fusion
//! annotations. Loaded from JSON:
//!
//! ```json
//! {
//!   "genes": [{"gene": "BRAF", "role": "ONCO"}],
//!   "hotspots": [{"gene": "BRAF", "protein_impact": "p.Val600Glu",
//!                 "protein_effect": "GAIN_OF_FUNCTION"}],
//!   "copy_numbers": [{"gene": "ERBB2", "direction": "GAIN",
//!                     "protein_effect": "GAIN_OF_FUNCTION"}],
//!   "fusions": [{"gene_up": "EML4", "gene_down": "ALK",
//!                "protein_effect": "GAIN_OF_FUNCTION"}]
//! }
//! ```
//!
//! Hotspot protein impacts may be written in either three- or single-letter
//! notation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::PanelError;
use crate::hgvs::protein::to_single_letter;
use crate::model::{GeneRole, ProteinEffect};

/// Direction of a curated copy-number alteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KnownCopyNumberDirection {
    Gain,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GeneEntry {
    gene: String,
    role: GeneRole,
}

/// Curated annotation of a specific alteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CuratedAlteration {
    #[serde(default)]
    pub protein_effect: ProteinEffect,
    #[serde(default)]
    pub is_associated_with_drug_resistance: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct HotspotEntry {
    gene: String,
    protein_impact: String,
    #[serde(flatten)]
    alteration: CuratedAlteration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CopyNumberEntry {
    gene: String,
    direction: KnownCopyNumberDirection,
    #[serde(flatten)]
    alteration: CuratedAlteration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct FusionEntry {
    gene_up: String,
    gene_down: String,
    #[serde(flatten)]
    alteration: CuratedAlteration,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KnowledgeBaseFile {
    #[serde(default)]
    genes: Vec<GeneEntry>,
    #[serde(default)]
    hotspots: Vec<HotspotEntry>,
    #[serde(default)]
    copy_numbers: Vec<CopyNumberEntry>,
    #[serde(default)]
    fusions: Vec<FusionEntry>,
}

/// Indexed knowledge base
#[derive(Debug, Clone, Default)]
pub struct GeneKnowledgeBase {
    roles: HashMap<String, GeneRole>,
    hotspots: HashMap<(String, String), CuratedAlteration>,
    copy_numbers: HashMap<(String, KnownCopyNumberDirection), CuratedAlteration>,
    fusions: HashMap<(String, String), CuratedAlteration>,
}

impl GeneKnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file
    pub fn from_json(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, PanelError> {
        let file: KnowledgeBaseFile = serde_json::from_str(content)?;
        let mut kb = Self::new();
        for entry in file.genes {
            kb = kb.with_gene(&entry.gene, entry.role);
        }
        for entry in file.hotspots {
            kb = kb.with_hotspot(&entry.gene, &entry.protein_impact, entry.alteration);
        }
        for entry in file.copy_numbers {
            kb = kb.with_copy_number(&entry.gene, entry.direction, entry.alteration);
        }
        for entry in file.fusions {
            kb = kb.with_fusion(&entry.gene_up, &entry.gene_down, entry.alteration);
        }
        Ok(kb)
    }

    pub fn with_gene(mut self, gene: &str, role: GeneRole) -> Self {
        self.roles.insert(gene.to_string(), role);
        self
    }

    pub fn with_hotspot(mut self, gene: &str, protein_impact: &str, alteration: CuratedAlteration) -> Self {
        self.hotspots
            .insert((gene.to_string(), to_single_letter(protein_impact)), alteration);
        self
    }

    pub fn with_copy_number(
        mut self,
        gene: &str,
        direction: KnownCopyNumberDirection,
        alteration: CuratedAlteration,
    ) -> Self {
        self.copy_numbers
            .insert((gene.to_string(), direction), alteration);
        self
    }

    pub fn with_fusion(mut self, gene_up: &str, gene_down: &str, alteration: CuratedAlteration) -> Self {
        self.fusions
            .insert((gene_up.to_string(), gene_down.to_string()), alteration);
        self
    }

    /// Role of a curated gene; `None` when the gene is not curated
    pub fn gene_role(&self, gene: &str) -> Option<GeneRole> {
        self.roles.get(gene).copied()
    }

    /// Curated hotspot for a single-letter protein impact
    pub fn hotspot(&self, gene: &str, protein_impact: &str) -> Option<&CuratedAlteration> {
        self.hotspots
            .get(&(gene.to_string(), protein_impact.to_string()))
    }

    /// Whether any hotspot is curated for `gene`
    pub fn has_hotspots(&self, gene: &str) -> bool {
        self.hotspots.keys().any(|(g, _)| g == gene)
    }

    pub fn copy_number(
        &self,
        gene: &str,
        direction: KnownCopyNumberDirection,
    ) -> Option<&CuratedAlteration> {
        self.copy_numbers.get(&(gene.to_string(), direction))
    }

    pub fn fusion(&self, gene_up: &str, gene_down: &str) -> Option<&CuratedAlteration> {
        self.fusions
            .get(&(gene_up.to_string(), gene_down.to_string()))
    }

    pub fn gene_count(&self) -> usize {
        self.roles.len()
    }
}
