//! Raw panel calls, as reported by the sequencing provider.
//!
//! These types are never modified by the pipeline; every annotation stage
//! builds new records from them.

use serde::{Deserialize, Serialize};

use super::driver::VirusType;

/// A small variant call: coding and/or protein HGVS on a gene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SequencedVariant {
    /// Gene symbol
    pub gene: String,
    /// Transcript the HGVS was reported on (if any)
    #[serde(default)]
    pub transcript: Option<String>,
    /// Coding HGVS (e.g., "c.1799T>A")
    #[serde(default)]
    pub hgvs_coding_impact: Option<String>,
    /// Protein HGVS (e.g., "p.V600E")
    #[serde(default)]
    pub hgvs_protein_impact: Option<String>,
    /// Variant allele frequency
    #[serde(default)]
    pub variant_allele_frequency: Option<f64>,
}

impl SequencedVariant {
    /// Create a variant call with a coding impact only
    pub fn coding(gene: impl Into<String>, hgvs_coding_impact: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            hgvs_coding_impact: Some(hgvs_coding_impact.into()),
            ..Default::default()
        }
    }

    /// Set the reported transcript
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// Set the reported protein impact
    pub fn with_protein_impact(mut self, hgvs_protein_impact: impl Into<String>) -> Self {
        self.hgvs_protein_impact = Some(hgvs_protein_impact.into());
        self
    }

    /// Set the variant allele frequency
    pub fn with_allele_frequency(mut self, vaf: f64) -> Self {
        self.variant_allele_frequency = Some(vaf);
        self
    }

    /// The HGVS to resolve when the call has no decomposition: coding, else protein.
    pub fn query_hgvs(&self) -> Option<&str> {
        self.hgvs_coding_impact
            .as_deref()
            .or(self.hgvs_protein_impact.as_deref())
    }
}

/// A gene amplification call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencedAmplification {
    pub gene: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub copies: Option<u32>,
    #[serde(default)]
    pub is_partial: bool,
}

/// A gene deletion call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencedDeletion {
    pub gene: String,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub is_partial: bool,
}

/// A fusion call. Either partner may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencedFusion {
    #[serde(default)]
    pub gene_up: Option<String>,
    #[serde(default)]
    pub gene_down: Option<String>,
    #[serde(default)]
    pub transcript_up: Option<String>,
    #[serde(default)]
    pub transcript_down: Option<String>,
    #[serde(default)]
    pub exon_up: Option<u32>,
    #[serde(default)]
    pub exon_down: Option<u32>,
}

impl SequencedFusion {
    /// Create a fusion call between two known genes
    pub fn pair(gene_up: impl Into<String>, gene_down: impl Into<String>) -> Self {
        Self {
            gene_up: Some(gene_up.into()),
            gene_down: Some(gene_down.into()),
            ..Default::default()
        }
    }
}

/// An exon-skipping call (exons `exon_start..=exon_end` are skipped)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SequencedSkippedExons {
    pub gene: String,
    pub exon_start: u32,
    pub exon_end: u32,
    #[serde(default)]
    pub transcript: Option<String>,
}

/// A viral presence call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedVirus {
    pub virus_type: VirusType,
    #[serde(default)]
    pub is_low_risk: bool,
    #[serde(default)]
    pub integrated_virus: Option<String>,
}

/// An HLA typing call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SequencedHlaAllele {
    pub name: String,
    #[serde(default)]
    pub tumor_copy_number: Option<f64>,
    #[serde(default)]
    pub has_somatic_mutations: Option<bool>,
}

/// All raw calls of one panel run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelTestResult {
    pub test_name: String,
    #[serde(default)]
    pub variants: Vec<SequencedVariant>,
    #[serde(default)]
    pub amplifications: Vec<SequencedAmplification>,
    #[serde(default)]
    pub deletions: Vec<SequencedDeletion>,
    #[serde(default)]
    pub fusions: Vec<SequencedFusion>,
    #[serde(default)]
    pub skipped_exons: Vec<SequencedSkippedExons>,
    #[serde(default)]
    pub viruses: Vec<SequencedVirus>,
    #[serde(default)]
    pub hla_alleles: Vec<SequencedHlaAllele>,
    #[serde(default)]
    pub tumor_mutational_burden: Option<f64>,
    #[serde(default)]
    pub is_microsatellite_unstable: Option<bool>,
    #[serde(default)]
    pub is_homologous_recombination_deficient: Option<bool>,
}

impl PanelTestResult {
    /// Create an empty result for the named test
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            ..Default::default()
        }
    }
}
