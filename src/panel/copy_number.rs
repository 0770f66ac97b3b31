//! Annotation of amplification and deletion calls.

use log::warn;

use crate::error::PanelError;
use crate::model::{
    ClinicalEvidence, CopyNumber, CopyNumberType, DriverLikelihood, GeneRole, ProteinEffect,
    SequencedAmplification, SequencedDeletion, TranscriptCopyNumberImpact,
};
use crate::reference::EnsemblDataCache;

/// Classifies copy-number calls against the gene's canonical transcript.
///
/// A call on the canonical transcript (or without a transcript) becomes the
/// canonical impact. A call on any other transcript leaves the canonical
/// impact at [`CopyNumberType::None`] and is recorded as an other impact.
pub struct PanelCopyNumberAnnotator<'a> {
    ensembl: &'a EnsemblDataCache,
}

impl<'a> PanelCopyNumberAnnotator<'a> {
    pub fn new(ensembl: &'a EnsemblDataCache) -> Self {
        Self { ensembl }
    }

    /// Annotate amplifications followed by deletions
    pub fn annotate(
        &self,
        amplifications: &[SequencedAmplification],
        deletions: &[SequencedDeletion],
    ) -> Result<Vec<CopyNumber>, PanelError> {
        let mut copy_numbers = Vec::with_capacity(amplifications.len() + deletions.len());
        for amplification in amplifications {
            copy_numbers.push(self.annotate_amplification(amplification)?);
        }
        for deletion in deletions {
            copy_numbers.push(self.annotate_deletion(deletion)?);
        }
        Ok(copy_numbers)
    }

    pub fn annotate_amplification(
        &self,
        call: &SequencedAmplification,
    ) -> Result<CopyNumber, PanelError> {
        let copy_number_type = if call.is_partial {
            CopyNumberType::PartialGain
        } else {
            CopyNumberType::FullGain
        };
        self.build(
            &call.gene,
            call.transcript.as_deref(),
            copy_number_type,
            call.copies,
            call.copies,
            format!("{} amp", call.gene),
        )
    }

    pub fn annotate_deletion(&self, call: &SequencedDeletion) -> Result<CopyNumber, PanelError> {
        let (copy_number_type, max_copies) = if call.is_partial {
            (CopyNumberType::PartialDel, 1)
        } else {
            (CopyNumberType::FullDel, 0)
        };
        self.build(
            &call.gene,
            call.transcript.as_deref(),
            copy_number_type,
            Some(0),
            Some(max_copies),
            format!("{} del", call.gene),
        )
    }

    fn build(
        &self,
        gene: &str,
        transcript: Option<&str>,
        copy_number_type: CopyNumberType,
        min_copies: Option<u32>,
        max_copies: Option<u32>,
        event: String,
    ) -> Result<CopyNumber, PanelError> {
        let canonical = self.ensembl.canonical_transcript_id(gene)?;
        let transcript = match transcript {
            Some(transcript) => transcript,
            None => {
                warn!(
                    "No transcript reported for {}, using canonical transcript {}",
                    event, canonical
                );
                canonical
            }
        };

        let event_impact = TranscriptCopyNumberImpact {
            transcript_id: transcript.to_string(),
            copy_number_type,
            min_copies,
            max_copies,
        };
        let (canonical_impact, other_impacts) = if transcript == canonical {
            (event_impact, Vec::new())
        } else {
            let none = TranscriptCopyNumberImpact {
                transcript_id: canonical.to_string(),
                copy_number_type: CopyNumberType::None,
                min_copies: None,
                max_copies: None,
            };
            (none, vec![event_impact])
        };

        Ok(CopyNumber {
            gene: gene.to_string(),
            event,
            canonical_impact,
            other_impacts,
            is_reportable: true,
            driver_likelihood: Some(DriverLikelihood::High),
            gene_role: GeneRole::Unknown,
            protein_effect: ProteinEffect::Unknown,
            is_associated_with_drug_resistance: None,
            evidence: ClinicalEvidence::default(),
        })
    }
}
