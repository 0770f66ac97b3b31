//! Annotation of small variant calls.

use log::{debug, warn};
use std::collections::HashMap;

use crate::annotation::{
    ExonCodon, ExonCodonLookup, ImpactQuery, TranscriptImpactAnnotator, TranscriptImpactEntry,
    VariantResolver,
};
use crate::error::PanelError;
use crate::hgvs::protein::{protein_event, to_single_letter};
use crate::model::{
    ClinicalEvidence, GeneRole, ProteinEffect, SequencedVariant, TranscriptVariantImpact, Variant,
    VariantType,
};
use crate::reference::VariantDecompositionIndex;

use super::collapse::PhasedDecompositionCollapser;
use super::exon_codon::PhaseSetExonCodonResolver;
use super::expand::VariantDecompositionExpander;
use super::stage::{CollapsedVariant, CoordinateResolved, ImpactAnnotated};

/// Turns raw variant calls into annotated [`Variant`] drivers.
///
/// The pipeline is:
/// 1. expand calls into queries (decomposed calls become phase sets)
/// 2. resolve each query's HGVS; any resolution failure drops that query
/// 3. annotate all coordinates in one batch; a missing response is fatal
/// 4. collapse each phase set into one representative
/// 5. finalize with exon/codon lookups on every same-gene transcript
pub struct PanelVariantAnnotator<'a> {
    decompositions: &'a VariantDecompositionIndex,
    resolver: &'a dyn VariantResolver,
    impacts: &'a dyn TranscriptImpactAnnotator,
    exon_codons: &'a dyn ExonCodonLookup,
}

enum QueryGroup {
    Single(ImpactAnnotated),
    Phased(usize, Vec<ImpactAnnotated>),
}

impl<'a> PanelVariantAnnotator<'a> {
    pub fn new(
        decompositions: &'a VariantDecompositionIndex,
        resolver: &'a dyn VariantResolver,
        impacts: &'a dyn TranscriptImpactAnnotator,
        exon_codons: &'a dyn ExonCodonLookup,
    ) -> Self {
        Self {
            decompositions,
            resolver,
            impacts,
            exon_codons,
        }
    }

    pub fn annotate(&self, variants: &[SequencedVariant]) -> Result<Vec<Variant>, PanelError> {
        let queries = VariantDecompositionExpander::new(self.decompositions).expand(variants);
        debug!("Expanded {} variant calls into {} queries", variants.len(), queries.len());

        let mut resolved = Vec::with_capacity(queries.len());
        for query in queries {
            let source = &query.source;
            match self
                .resolver
                .resolve(&source.gene, source.transcript.as_deref(), &query.query_hgvs)
            {
                Ok(coordinate) => resolved.push(query.resolved(coordinate)),
                Err(e) => {
                    warn!("Dropping query {} ({} {}): {}", query.query_id, source.gene, query.query_hgvs, e);
                }
            }
        }

        let annotated = self.annotate_impacts(resolved)?;
        let collapser = PhasedDecompositionCollapser::new(
            self.resolver,
            PhaseSetExonCodonResolver::new(self.exon_codons),
        );

        group_by_phase_set(annotated)
            .into_iter()
            .map(|group| {
                let collapsed = match group {
                    QueryGroup::Single(member) => member.into_collapsed(),
                    QueryGroup::Phased(id, members) => collapser.collapse(id, members)?,
                };
                self.finalize(collapsed)
            })
            .collect()
    }

    fn annotate_impacts(
        &self,
        resolved: Vec<CoordinateResolved>,
    ) -> Result<Vec<ImpactAnnotated>, PanelError> {
        if resolved.is_empty() {
            return Ok(Vec::new());
        }
        let queries: Vec<ImpactQuery> = resolved
            .iter()
            .map(|r| ImpactQuery {
                id: r.variant.query_id,
                coordinate: r.coordinate.clone(),
            })
            .collect();

        let mut responses: HashMap<usize, _> = HashMap::with_capacity(queries.len());
        for response in self.impacts.run(&queries)? {
            responses.insert(response.id, response.impact);
        }

        let missing: Vec<usize> = queries
            .iter()
            .map(|q| q.id)
            .filter(|id| !responses.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(PanelError::MissingImpactResponse { query_ids: missing });
        }
        if responses.len() > queries.len() {
            warn!(
                "Transcript impact annotator returned {} responses for {} queries; ignoring extras",
                responses.len(),
                queries.len()
            );
        }

        resolved
            .into_iter()
            .map(|r| {
                let id = r.variant.query_id;
                responses
                    .remove(&id)
                    .map(|impact| r.annotated(impact))
                    .ok_or(PanelError::MissingImpactResponse { query_ids: vec![id] })
            })
            .collect()
    }

    fn finalize(&self, collapsed: CollapsedVariant) -> Result<Variant, PanelError> {
        let CollapsedVariant {
            source,
            coordinate,
            impact,
            canonical_exon_codon,
        } = collapsed;
        let gene = source.gene;
        let canonical_transcript = impact.canonical.transcript_id.clone();

        let canonical_exon_codon = match canonical_exon_codon {
            Some(exon_codon) => exon_codon,
            None => self.lookup(&gene, &canonical_transcript, coordinate.position)?,
        };
        let canonical_impact = transcript_impact(impact.canonical, canonical_exon_codon);

        let other_impacts = impact
            .others
            .into_iter()
            .filter(|entry| entry.gene == gene && entry.transcript_id != canonical_transcript)
            .map(|entry| {
                let exon_codon = self.lookup(&gene, &entry.transcript_id, coordinate.position)?;
                Ok(transcript_impact(entry, exon_codon))
            })
            .collect::<Result<Vec<_>, PanelError>>()?;

        let event = variant_event(&gene, &canonical_impact);
        Ok(Variant {
            variant_type: VariantType::from_alleles(&coordinate.ref_allele, &coordinate.alt_allele),
            gene,
            chromosome: coordinate.chromosome,
            position: coordinate.position,
            ref_allele: coordinate.ref_allele,
            alt_allele: coordinate.alt_allele,
            variant_allele_frequency: source.variant_allele_frequency,
            canonical_impact,
            other_impacts,
            event,
            is_reportable: true,
            is_hotspot: false,
            is_cancer_associated_variant: false,
            driver_likelihood: None,
            gene_role: GeneRole::Unknown,
            protein_effect: ProteinEffect::Unknown,
            is_associated_with_drug_resistance: None,
            evidence: ClinicalEvidence::default(),
        })
    }

    fn lookup(&self, gene: &str, transcript: &str, position: u64) -> Result<ExonCodon, PanelError> {
        self.exon_codons
            .run(gene, transcript, position)
            .ok_or_else(|| PanelError::MissingExonCodon {
                gene: gene.to_string(),
                transcript: transcript.to_string(),
                position,
            })
    }
}

/// Group annotated queries by phase set, keeping the position of each
/// group's first member.
fn group_by_phase_set(annotated: Vec<ImpactAnnotated>) -> Vec<QueryGroup> {
    let mut groups: Vec<QueryGroup> = Vec::new();
    let mut phase_set_index: HashMap<usize, usize> = HashMap::new();
    for member in annotated {
        match member.phase_set() {
            None => groups.push(QueryGroup::Single(member)),
            Some(id) => match phase_set_index.get(&id) {
                Some(&index) => {
                    if let QueryGroup::Phased(_, members) = &mut groups[index] {
                        members.push(member);
                    }
                }
                None => {
                    phase_set_index.insert(id, groups.len());
                    groups.push(QueryGroup::Phased(id, vec![member]));
                }
            },
        }
    }
    groups
}

fn transcript_impact(entry: TranscriptImpactEntry, exon_codon: ExonCodon) -> TranscriptVariantImpact {
    TranscriptVariantImpact {
        transcript_id: entry.transcript_id,
        hgvs_coding_impact: entry.hgvs_coding_impact,
        hgvs_protein_impact: to_single_letter(&entry.hgvs_protein_impact),
        affected_codon: exon_codon.codon,
        affected_exon: exon_codon.exon,
        is_splice_region: entry.is_splice_region,
        effects: entry.effects,
        coding_effect: entry.coding_effect,
    }
}

/// "<gene> <protein change>", falling back to the coding impact
fn variant_event(gene: &str, impact: &TranscriptVariantImpact) -> String {
    match protein_event(&impact.hgvs_protein_impact) {
        Some(change) => format!("{} {}", gene, change),
        None if !impact.hgvs_coding_impact.is_empty() => {
            format!("{} {}", gene, impact.hgvs_coding_impact)
        }
        None => gene.to_string(),
    }
}
