//! File-backed annotation collaborators.
//!
//! Each collaborator loads precomputed responses from JSON and answers from
//! memory. The `add_*` builders make the same types usable as test doubles.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::provider::{
    ExonCodon, ExonCodonLookup, GenomicCoordinate, ImpactQuery, ImpactResponse,
    TranscriptImpactAnnotator, TranscriptImpactResponse, VariantResolver,
};
use crate::error::PanelError;

/// One precomputed HGVS resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub gene: String,
    #[serde(default)]
    pub transcript: Option<String>,
    pub hgvs: String,
    pub coordinate: GenomicCoordinate,
}

type ResolutionKey = (String, Option<String>, String);

/// Variant resolver answering from a table of precomputed resolutions.
///
/// A transcript-specific entry wins over a gene-level entry (no transcript).
#[derive(Debug, Clone, Default)]
pub struct FileVariantResolver {
    resolutions: HashMap<ResolutionKey, GenomicCoordinate>,
}

impl FileVariantResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load resolutions from a JSON list of [`ResolutionRecord`]s
    pub fn from_json(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<ResolutionRecord> = serde_json::from_str(&content)?;
        let mut resolver = Self::new();
        for record in records {
            resolver.add_record(record);
        }
        Ok(resolver)
    }

    pub fn add_record(&mut self, record: ResolutionRecord) {
        self.resolutions
            .insert((record.gene, record.transcript, record.hgvs), record.coordinate);
    }

    /// Add a gene-level resolution
    pub fn add_resolution(
        &mut self,
        gene: impl Into<String>,
        hgvs: impl Into<String>,
        coordinate: GenomicCoordinate,
    ) {
        self.resolutions
            .insert((gene.into(), None, hgvs.into()), coordinate);
    }

    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }
}

impl VariantResolver for FileVariantResolver {
    fn resolve(
        &self,
        gene: &str,
        transcript: Option<&str>,
        hgvs: &str,
    ) -> Result<GenomicCoordinate, PanelError> {
        let specific = transcript.and_then(|tx| {
            self.resolutions
                .get(&(gene.to_string(), Some(tx.to_string()), hgvs.to_string()))
        });
        specific
            .or_else(|| {
                self.resolutions
                    .get(&(gene.to_string(), None, hgvs.to_string()))
            })
            .cloned()
            .ok_or_else(|| PanelError::UnresolvedVariant {
                gene: gene.to_string(),
                hgvs: hgvs.to_string(),
                msg: "no precomputed resolution".to_string(),
            })
    }
}

/// One precomputed transcript-impact annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRecord {
    pub coordinate: GenomicCoordinate,
    pub impact: TranscriptImpactResponse,
}

/// Transcript-impact annotator answering from precomputed annotations keyed
/// by genomic coordinate. Unknown coordinates are left out of the response.
#[derive(Debug, Clone, Default)]
pub struct FileTranscriptImpactAnnotator {
    impacts: HashMap<GenomicCoordinate, TranscriptImpactResponse>,
}

impl FileTranscriptImpactAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load annotations from a JSON list of [`ImpactRecord`]s
    pub fn from_json(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<ImpactRecord> = serde_json::from_str(&content)?;
        let mut annotator = Self::new();
        for record in records {
            annotator.add_impact(record.coordinate, record.impact);
        }
        Ok(annotator)
    }

    pub fn add_impact(&mut self, coordinate: GenomicCoordinate, impact: TranscriptImpactResponse) {
        self.impacts.insert(coordinate, impact);
    }

    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }
}

impl TranscriptImpactAnnotator for FileTranscriptImpactAnnotator {
    fn run(&self, queries: &[ImpactQuery]) -> Result<Vec<ImpactResponse>, PanelError> {
        Ok(queries
            .iter()
            .filter_map(|query| {
                self.impacts
                    .get(&query.coordinate)
                    .map(|impact| ImpactResponse {
                        id: query.id,
                        impact: impact.clone(),
                    })
            })
            .collect())
    }
}

/// One precomputed exon/codon lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExonCodonRecord {
    pub gene: String,
    pub transcript: String,
    pub position: u64,
    #[serde(default)]
    pub exon: Option<u32>,
    #[serde(default)]
    pub codon: Option<u32>,
}

/// Exon/codon lookup answering from a precomputed table
#[derive(Debug, Clone, Default)]
pub struct FileExonCodonLookup {
    entries: HashMap<(String, String, u64), ExonCodon>,
}

impl FileExonCodonLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load lookups from a JSON list of [`ExonCodonRecord`]s
    pub fn from_json(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<ExonCodonRecord> = serde_json::from_str(&content)?;
        let mut lookup = Self::new();
        for record in records {
            lookup.add(
                record.gene,
                record.transcript,
                record.position,
                ExonCodon::new(record.exon, record.codon),
            );
        }
        Ok(lookup)
    }

    pub fn add(
        &mut self,
        gene: impl Into<String>,
        transcript: impl Into<String>,
        position: u64,
        exon_codon: ExonCodon,
    ) {
        self.entries
            .insert((gene.into(), transcript.into(), position), exon_codon);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExonCodonLookup for FileExonCodonLookup {
    fn run(&self, gene: &str, transcript: &str, position: u64) -> Option<ExonCodon> {
        self.entries
            .get(&(gene.to_string(), transcript.to_string(), position))
            .copied()
    }
}
