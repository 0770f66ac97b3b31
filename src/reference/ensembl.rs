//! Ensembl gene and transcript cache.
//!
//! # Format
//!
//! Tab-separated with columns `gene_id`, `gene_name`, `transcript_id`,
//! `is_canonical` (`true`/`false`/`1`/`0`). A header row starting with
//! `gene_id` is skipped.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use super::{data_fields, open_table};
use crate::error::PanelError;

/// A gene known to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneData {
    pub gene_id: String,
    pub gene_name: String,
}

/// A transcript known to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptData {
    pub transcript_id: String,
    pub gene_id: String,
    pub is_canonical: bool,
}

/// Gene names, ids and transcripts
#[derive(Debug, Clone, Default)]
pub struct EnsemblDataCache {
    genes_by_name: HashMap<String, GeneData>,
    transcripts_by_gene_id: HashMap<String, Vec<TranscriptData>>,
}

impl EnsemblDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a (possibly gzipped) TSV file
    pub fn from_path(path: &Path) -> Result<Self, PanelError> {
        Self::from_reader(open_table(path)?, &path.display().to_string())
    }

    /// Parse from a reader; `source_name` is used in error messages
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self, PanelError> {
        let mut cache = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let Some(fields) = data_fields(&line) else {
                continue;
            };
            if fields[0].eq_ignore_ascii_case("gene_id") {
                continue;
            }
            if fields.len() < 4 {
                return Err(PanelError::malformed(
                    source_name,
                    line_no,
                    format!("expected 4 columns, found {}", fields.len()),
                ));
            }
            let is_canonical = match fields[3] {
                "true" | "TRUE" | "1" => true,
                "false" | "FALSE" | "0" => false,
                other => {
                    return Err(PanelError::malformed(
                        source_name,
                        line_no,
                        format!("invalid canonical flag '{}'", other),
                    ))
                }
            };
            cache
                .insert(fields[0], fields[1], fields[2], is_canonical)
                .map_err(|msg| PanelError::malformed(source_name, line_no, msg))?;
        }
        Ok(cache)
    }

    /// Add a transcript; fails if the gene would get a second canonical transcript
    fn insert(
        &mut self,
        gene_id: &str,
        gene_name: &str,
        transcript_id: &str,
        is_canonical: bool,
    ) -> Result<(), String> {
        self.genes_by_name
            .entry(gene_name.to_string())
            .or_insert_with(|| GeneData {
                gene_id: gene_id.to_string(),
                gene_name: gene_name.to_string(),
            });
        let transcripts = self
            .transcripts_by_gene_id
            .entry(gene_id.to_string())
            .or_default();
        if is_canonical && transcripts.iter().any(|t| t.is_canonical) {
            return Err(format!("gene {} has more than one canonical transcript", gene_name));
        }
        transcripts.push(TranscriptData {
            transcript_id: transcript_id.to_string(),
            gene_id: gene_id.to_string(),
            is_canonical,
        });
        Ok(())
    }

    /// Builder used to assemble small caches in code
    pub fn with_transcript(
        mut self,
        gene_id: &str,
        gene_name: &str,
        transcript_id: &str,
        is_canonical: bool,
    ) -> Self {
        if let Err(msg) = self.insert(gene_id, gene_name, transcript_id, is_canonical) {
            log::warn!("Ignoring transcript {}: {}", transcript_id, msg);
        }
        self
    }

    pub fn find_gene_data_by_name(&self, gene: &str) -> Option<&GeneData> {
        self.genes_by_name.get(gene)
    }

    pub fn find_canonical_transcript(&self, gene_id: &str) -> Option<&TranscriptData> {
        self.transcripts_by_gene_id
            .get(gene_id)
            .and_then(|transcripts| transcripts.iter().find(|t| t.is_canonical))
    }

    /// Canonical transcript id of a gene by name.
    ///
    /// Fails with [`PanelError::UnknownGene`] or
    /// [`PanelError::NoCanonicalTranscript`].
    pub fn canonical_transcript_id(&self, gene: &str) -> Result<&str, PanelError> {
        let gene_data = self
            .find_gene_data_by_name(gene)
            .ok_or_else(|| PanelError::UnknownGene {
                gene: gene.to_string(),
            })?;
        self.find_canonical_transcript(&gene_data.gene_id)
            .map(|t| t.transcript_id.as_str())
            .ok_or_else(|| PanelError::NoCanonicalTranscript {
                gene: gene.to_string(),
                gene_id: gene_data.gene_id.clone(),
            })
    }

    pub fn gene_count(&self) -> usize {
        self.genes_by_name.len()
    }
}
