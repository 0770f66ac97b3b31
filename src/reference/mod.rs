//! Reference data loaded once at startup and never mutated afterwards.
//!
//! - [`VariantDecompositionIndex`]: reported HGVS to decomposed fragments
//! - [`EnsemblDataCache`]: gene names, ids and canonical transcripts
//! - [`KnownFusionCache`]: curated fusion pairs and promiscuous partners
//! - [`GeneKnowledgeBase`]: gene roles, hotspots and curated alterations
//! - [`EvidenceDatabase`]: actionable events with treatments

pub mod decomposition;
pub mod ensembl;
pub mod evidence;
pub mod fusion;
pub mod knowledge;

pub use decomposition::{VariantDecomposition, VariantDecompositionIndex};
pub use ensembl::{EnsemblDataCache, GeneData, TranscriptData};
pub use evidence::{ActionableEvent, EvidenceDatabase, EvidenceRule};
pub use fusion::{KnownFusionCache, KnownFusionType};
pub use knowledge::{CuratedAlteration, GeneKnowledgeBase, KnownCopyNumberDirection};

use flate2::read::MultiGzDecoder;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::ReferenceConfig;
use crate::error::PanelError;

/// Open a reference table, transparently decompressing `.gz` files
pub fn open_table(path: &Path) -> Result<Box<dyn BufRead>, PanelError> {
    let file = File::open(path).map_err(|e| PanelError::Io {
        msg: format!("{}: {}", path.display(), e),
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Split a tab-separated line, skipping blank and `#` comment lines
pub(crate) fn data_fields(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim_end_matches(|c| c == '\r' || c == '\n');
    if trimmed.trim().is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.split('\t').map(str::trim).collect())
}

/// All reference data needed to annotate panel tests
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub decompositions: VariantDecompositionIndex,
    pub ensembl: EnsemblDataCache,
    pub known_fusions: KnownFusionCache,
    pub knowledge_base: GeneKnowledgeBase,
    pub evidence: EvidenceDatabase,
}

impl ReferenceData {
    /// Load every configured table; unconfigured tables are empty
    pub fn load(config: &ReferenceConfig) -> Result<Self, PanelError> {
        let decompositions = match &config.decomposition_path {
            Some(path) => VariantDecompositionIndex::from_path(path)?,
            None => VariantDecompositionIndex::default(),
        };
        let ensembl = match &config.ensembl_path {
            Some(path) => EnsemblDataCache::from_path(path)?,
            None => EnsemblDataCache::default(),
        };
        let known_fusions = match &config.known_fusion_path {
            Some(path) => KnownFusionCache::from_path(path)?,
            None => KnownFusionCache::default(),
        };
        let knowledge_base = match &config.knowledge_base_path {
            Some(path) => GeneKnowledgeBase::from_json(path)?,
            None => GeneKnowledgeBase::default(),
        };
        let evidence = match &config.evidence_path {
            Some(path) => EvidenceDatabase::from_json(path)?,
            None => EvidenceDatabase::default(),
        };

        info!(
            "Loaded reference data: {} decompositions, {} genes, {} known fusion entries, {} knowledge-base genes, {} actionable events",
            decompositions.len(),
            ensembl.gene_count(),
            known_fusions.len(),
            knowledge_base.gene_count(),
            evidence.len()
        );

        Ok(Self {
            decompositions,
            ensembl,
            known_fusions,
            knowledge_base,
            evidence,
        })
    }
}
