//! Collapsing of phase sets into one representative variant.

use log::{debug, warn};
use std::collections::BTreeSet;

use crate::annotation::{TranscriptImpactEntry, VariantResolver};
use crate::error::PanelError;
use crate::model::VariantEffect;

use super::exon_codon::PhaseSetExonCodonResolver;
use super::stage::{CollapsedVariant, ImpactAnnotated};

/// Collapses the annotated fragments of one decomposed call.
pub struct PhasedDecompositionCollapser<'a> {
    resolver: &'a dyn VariantResolver,
    exon_codons: PhaseSetExonCodonResolver<'a>,
}

impl<'a> PhasedDecompositionCollapser<'a> {
    pub fn new(resolver: &'a dyn VariantResolver, exon_codons: PhaseSetExonCodonResolver<'a>) -> Self {
        Self {
            resolver,
            exon_codons,
        }
    }

    /// Collapse `members` (in expansion order) into the first member.
    ///
    /// All members must report the same non-blank canonical protein impact.
    /// The representative takes the phase-set exon/codon consensus and, when
    /// the resolver can map it, the coordinate of the original combined HGVS.
    /// Phased effects are reported as their ordinary equivalents.
    pub fn collapse(
        &self,
        phase_set_id: usize,
        members: Vec<ImpactAnnotated>,
    ) -> Result<CollapsedVariant, PanelError> {
        let impacts: Vec<&str> = members.iter().map(|m| m.canonical_protein_impact()).collect();
        let consistent = impacts
            .first()
            .is_some_and(|first| !first.trim().is_empty() && impacts.iter().all(|i| i == first));
        if !consistent {
            return Err(PanelError::PhaseSetProteinMismatch {
                phase_set_id,
                impacts: impacts.iter().map(|i| i.to_string()).collect(),
            });
        }

        let exon_codon = self.exon_codons.resolve(phase_set_id, &members)?;

        let mut members = members.into_iter();
        let Some(representative) = members.next() else {
            return Err(PanelError::PhaseSetProteinMismatch {
                phase_set_id,
                impacts: vec![],
            });
        };
        debug!(
            "Collapsing phase set {} into query {} ({} fragments dropped)",
            phase_set_id,
            representative.query_id(),
            members.len()
        );

        let source = representative.variant.source;
        let mut coordinate = representative.coordinate;
        if let Some(combined) = source.hgvs_coding_impact.as_deref() {
            match self
                .resolver
                .resolve(&source.gene, source.transcript.as_deref(), combined)
            {
                Ok(resolved) => coordinate = resolved,
                Err(e) => warn!(
                    "Could not re-resolve {} {} for phase set {}, keeping fragment coordinates: {}",
                    source.gene, combined, phase_set_id, e
                ),
            }
        }

        let mut impact = representative.impact;
        if let Some(combined) = source.hgvs_coding_impact.as_deref() {
            impact.canonical.hgvs_coding_impact = combined.to_string();
        }
        normalize_effects(&mut impact.canonical);
        impact.others.iter_mut().for_each(normalize_effects);

        Ok(CollapsedVariant {
            source,
            coordinate,
            impact,
            canonical_exon_codon: exon_codon,
        })
    }
}

fn normalize_effects(entry: &mut TranscriptImpactEntry) {
    let effects: BTreeSet<VariantEffect> = entry.effects.iter().map(|e| e.normalized()).collect();
    entry.effects = effects;
}
