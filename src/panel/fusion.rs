//! Annotation of fusion and exon-skipping calls.

use log::warn;

use crate::error::PanelError;
use crate::model::{
    ClinicalEvidence, DriverLikelihood, Fusion, FusionDriverType, ProteinEffect, SequencedFusion,
    SequencedSkippedExons,
};
use crate::reference::{EnsemblDataCache, KnownFusionCache};

/// Classifies fusions against the known-fusion cache.
///
/// Exon skips are modelled as self-fusions of the skipping gene and go
/// through the same classification.
pub struct PanelFusionAnnotator<'a> {
    known_fusions: &'a KnownFusionCache,
    ensembl: &'a EnsemblDataCache,
}

impl<'a> PanelFusionAnnotator<'a> {
    pub fn new(known_fusions: &'a KnownFusionCache, ensembl: &'a EnsemblDataCache) -> Self {
        Self {
            known_fusions,
            ensembl,
        }
    }

    /// Annotate fusions followed by exon skips
    pub fn annotate(
        &self,
        fusions: &[SequencedFusion],
        skipped_exons: &[SequencedSkippedExons],
    ) -> Result<Vec<Fusion>, PanelError> {
        let mut annotated: Vec<Fusion> = fusions.iter().map(|f| self.annotate_fusion(f)).collect();
        for skip in skipped_exons {
            annotated.push(self.annotate_skipped_exons(skip)?);
        }
        Ok(annotated)
    }

    pub fn annotate_fusion(&self, call: &SequencedFusion) -> Fusion {
        let gene_up = call.gene_up.as_deref();
        let gene_down = call.gene_down.as_deref();
        let event = match (gene_up, gene_down) {
            (Some(up), Some(down)) => format!("{}::{} fusion", up, down),
            (Some(gene), None) | (None, Some(gene)) => format!("{} fusion", gene),
            (None, None) => "fusion".to_string(),
        };
        let driver_type = self.classify(gene_up, gene_down);
        fusion(
            gene_up.unwrap_or_default(),
            gene_down.unwrap_or_default(),
            call.transcript_up.clone(),
            call.transcript_down.clone(),
            call.exon_up,
            call.exon_down,
            driver_type,
            event,
        )
    }

    /// Exons `start..=end` skipped: the fusion joins exon `start - 1` to `end + 1`
    pub fn annotate_skipped_exons(&self, call: &SequencedSkippedExons) -> Result<Fusion, PanelError> {
        let event = if call.exon_start == call.exon_end {
            format!("{} exon {} skip", call.gene, call.exon_start)
        } else {
            format!("{} exon {}-{} skip", call.gene, call.exon_start, call.exon_end)
        };
        let transcript = match &call.transcript {
            Some(transcript) => transcript.clone(),
            None => {
                let canonical = self.ensembl.canonical_transcript_id(&call.gene)?;
                warn!(
                    "No transcript reported for {}, using canonical transcript {}",
                    event, canonical
                );
                canonical.to_string()
            }
        };
        let driver_type = self.classify(Some(&call.gene), Some(&call.gene));
        Ok(fusion(
            &call.gene,
            &call.gene,
            Some(transcript.clone()),
            Some(transcript),
            Some(call.exon_start.saturating_sub(1)),
            Some(call.exon_end.saturating_add(1)),
            driver_type,
            event,
        ))
    }

    /// Driver type of a fusion between the given partners
    pub fn classify(&self, gene_up: Option<&str>, gene_down: Option<&str>) -> FusionDriverType {
        if let (Some(up), Some(down)) = (gene_up, gene_down) {
            if self.known_fusions.has_known_fusion(up, down) {
                return FusionDriverType::KnownPair;
            }
            if up == down && self.known_fusions.has_exon_del_dup(up) {
                return FusionDriverType::KnownPairDelDup;
            }
        }
        let five = gene_up.is_some_and(|g| self.known_fusions.has_promiscuous_five_gene(g));
        let three = gene_down.is_some_and(|g| self.known_fusions.has_promiscuous_three_gene(g));
        match (five, three) {
            (true, true) => FusionDriverType::PromiscuousBoth,
            (true, false) => FusionDriverType::Promiscuous5,
            (false, true) => FusionDriverType::Promiscuous3,
            (false, false) => FusionDriverType::None,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn fusion(
    gene_start: &str,
    gene_end: &str,
    gene_transcript_start: Option<String>,
    gene_transcript_end: Option<String>,
    fused_exon_up: Option<u32>,
    fused_exon_down: Option<u32>,
    driver_type: FusionDriverType,
    event: String,
) -> Fusion {
    let driver_likelihood = if driver_type.is_known_pair() {
        DriverLikelihood::High
    } else {
        DriverLikelihood::Low
    };
    Fusion {
        gene_start: gene_start.to_string(),
        gene_end: gene_end.to_string(),
        gene_transcript_start,
        gene_transcript_end,
        fused_exon_up,
        fused_exon_down,
        driver_type,
        event,
        is_reportable: true,
        driver_likelihood: Some(driver_likelihood),
        protein_effect: ProteinEffect::Unknown,
        is_associated_with_drug_resistance: None,
        evidence: ClinicalEvidence::default(),
    }
}
