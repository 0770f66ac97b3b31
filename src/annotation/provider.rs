//! Interfaces of the external annotation collaborators.
//!
//! The pipeline treats these as reliable, local services. Implementations
//! might include:
//! - file-backed responses precomputed by an external annotation run
//! - in-process bindings to a transcript-effect predictor

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::PanelError;
use crate::model::{CodingEffect, VariantEffect};

/// A resolved genomic position with its alleles
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenomicCoordinate {
    pub chromosome: String,
    /// 1-based position
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
}

impl GenomicCoordinate {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            ref_allele: ref_allele.into(),
            alt_allele: alt_allele.into(),
        }
    }
}

/// Resolves reported HGVS to genomic coordinates
pub trait VariantResolver: Send + Sync {
    /// Resolve `hgvs` on `gene` (and `transcript` when reported).
    ///
    /// Returns [`PanelError::UnresolvedVariant`] when no mapping exists.
    fn resolve(
        &self,
        gene: &str,
        transcript: Option<&str>,
        hgvs: &str,
    ) -> Result<GenomicCoordinate, PanelError>;
}

/// One query in a transcript-impact batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactQuery {
    pub id: usize,
    pub coordinate: GenomicCoordinate,
}

/// Outcome of a variant on one transcript, as reported by the annotator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptImpactEntry {
    pub gene: String,
    pub transcript_id: String,
    #[serde(default)]
    pub hgvs_coding_impact: String,
    #[serde(default)]
    pub hgvs_protein_impact: String,
    #[serde(default)]
    pub is_splice_region: bool,
    #[serde(default)]
    pub effects: BTreeSet<VariantEffect>,
    #[serde(default)]
    pub coding_effect: Option<CodingEffect>,
}

/// All transcript impacts of one query; the canonical transcript is explicit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptImpactResponse {
    pub canonical: TranscriptImpactEntry,
    #[serde(default)]
    pub others: Vec<TranscriptImpactEntry>,
}

impl TranscriptImpactResponse {
    pub fn canonical_transcript_id(&self) -> &str {
        &self.canonical.transcript_id
    }
}

/// Response to one [`ImpactQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResponse {
    pub id: usize,
    pub impact: TranscriptImpactResponse,
}

/// Annotates genomic coordinates with per-transcript impacts, in batch
pub trait TranscriptImpactAnnotator: Send + Sync {
    /// Annotate all queries in one call. Queries the annotator cannot answer
    /// are simply absent from the response.
    fn run(&self, queries: &[ImpactQuery]) -> Result<Vec<ImpactResponse>, PanelError>;
}

/// Affected exon and codon of a position on a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExonCodon {
    pub exon: Option<u32>,
    pub codon: Option<u32>,
}

impl ExonCodon {
    pub fn new(exon: Option<u32>, codon: Option<u32>) -> Self {
        Self { exon, codon }
    }
}

/// Looks up the affected exon/codon of a transcript position
pub trait ExonCodonLookup: Send + Sync {
    /// Returns `None` when the transcript or position is unknown
    fn run(&self, gene: &str, transcript: &str, position: u64) -> Option<ExonCodon>;
}
