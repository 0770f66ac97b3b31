//! Consensus exon/codon of a phase set.

use log::warn;

use crate::annotation::{ExonCodon, ExonCodonLookup};
use crate::error::PanelError;

use super::stage::ImpactAnnotated;

/// Resolves one exon/codon for all members of a phase set.
///
/// Every member must report the same canonical transcript, and the lookup
/// must know each member's position on it.
pub struct PhaseSetExonCodonResolver<'a> {
    lookup: &'a dyn ExonCodonLookup,
}

impl<'a> PhaseSetExonCodonResolver<'a> {
    pub fn new(lookup: &'a dyn ExonCodonLookup) -> Self {
        Self { lookup }
    }

    /// Consensus exon/codon on the shared canonical transcript; `None` when
    /// `members` is empty.
    pub fn resolve(
        &self,
        phase_set_id: usize,
        members: &[ImpactAnnotated],
    ) -> Result<Option<ExonCodon>, PanelError> {
        let Some(first) = members.first() else {
            return Ok(None);
        };

        let transcript = first.impact.canonical_transcript_id();
        if members
            .iter()
            .any(|m| m.impact.canonical_transcript_id() != transcript)
        {
            let mut transcripts: Vec<String> = members
                .iter()
                .map(|m| m.impact.canonical_transcript_id().to_string())
                .collect();
            transcripts.dedup();
            return Err(PanelError::PhaseSetTranscriptMismatch {
                phase_set_id,
                transcripts,
            });
        }

        let candidates = members
            .iter()
            .map(|m| {
                let gene = &m.impact.canonical.gene;
                let position = m.coordinate.position;
                self.lookup
                    .run(gene, transcript, position)
                    .ok_or_else(|| PanelError::MissingExonCodon {
                        gene: gene.clone(),
                        transcript: transcript.to_string(),
                        position,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(consensus(phase_set_id, &candidates))
    }
}

/// Pick one exon/codon from the candidates of a phase set.
///
/// If all candidates agree the shared pair is returned. Otherwise the
/// candidate with the smallest codon wins (missing codons sort last, ties
/// broken by smallest exon); when no candidate has a codon the smallest exon
/// wins. Disagreement is logged.
pub fn consensus(phase_set_id: usize, candidates: &[ExonCodon]) -> Option<ExonCodon> {
    let first = *candidates.first()?;
    if candidates.iter().all(|c| *c == first) {
        return Some(first);
    }

    let chosen = if candidates.iter().any(|c| c.codon.is_some()) {
        candidates
            .iter()
            .min_by_key(|c| (c.codon.unwrap_or(u32::MAX), c.exon.unwrap_or(u32::MAX)))
            .copied()
    } else {
        candidates
            .iter()
            .min_by_key(|c| c.exon.unwrap_or(u32::MAX))
            .copied()
    };

    let exons: Vec<_> = candidates.iter().map(|c| c.exon).collect();
    let codons: Vec<_> = candidates.iter().map(|c| c.codon).collect();
    warn!(
        "Phase set {} has inconsistent exon/codon; chose {:?} from exons {:?} and codons {:?}",
        phase_set_id, chosen, exons, codons
    );
    chosen
}
