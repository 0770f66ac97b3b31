//! Expansion of raw variant calls into annotation queries.

use log::warn;
use std::cmp::Ordering;

use crate::model::SequencedVariant;
use crate::reference::VariantDecompositionIndex;

use super::stage::AnnotatableVariant;

/// Expands raw calls into [`AnnotatableVariant`] queries.
///
/// A call whose coding HGVS has a decomposition yields one query per fragment,
/// all sharing a phase set. Every other call yields a single unphased query on
/// its own coding (or else protein) HGVS.
///
/// Input is treated as a set: calls are sorted by (gene, transcript, coding
/// impact, protein impact, allele frequency) and exact duplicates dropped, so
/// query ids and phase sets do not depend on input order.
pub struct VariantDecompositionExpander<'a> {
    decompositions: &'a VariantDecompositionIndex,
}

impl<'a> VariantDecompositionExpander<'a> {
    pub fn new(decompositions: &'a VariantDecompositionIndex) -> Self {
        Self { decompositions }
    }

    pub fn expand(&self, variants: &[SequencedVariant]) -> Vec<AnnotatableVariant> {
        let mut sorted: Vec<&SequencedVariant> = variants.iter().collect();
        sorted.sort_by(|a, b| compare_calls(a, b));
        sorted.dedup_by(|a, b| a == b);

        let mut queries = Vec::new();
        for (position, variant) in sorted.into_iter().enumerate() {
            let fragments = variant
                .hgvs_coding_impact
                .as_deref()
                .and_then(|hgvs| self.decompositions.lookup(hgvs));

            match (fragments, variant.query_hgvs()) {
                (Some(fragments), _) => {
                    for fragment in fragments {
                        queries.push(AnnotatableVariant {
                            query_id: queries.len(),
                            source: variant.clone(),
                            query_hgvs: fragment.clone(),
                            phase_set: Some(position),
                        });
                    }
                }
                (None, Some(hgvs)) => queries.push(AnnotatableVariant {
                    query_id: queries.len(),
                    source: variant.clone(),
                    query_hgvs: hgvs.to_string(),
                    phase_set: None,
                }),
                (None, None) => {
                    warn!("Skipping {} variant without coding or protein impact", variant.gene);
                }
            }
        }
        queries
    }
}

fn compare_calls(a: &SequencedVariant, b: &SequencedVariant) -> Ordering {
    fn key(v: &SequencedVariant) -> (&str, &str, &str, &str) {
        (
            v.gene.as_str(),
            v.transcript.as_deref().unwrap_or(""),
            v.hgvs_coding_impact.as_deref().unwrap_or(""),
            v.hgvs_protein_impact.as_deref().unwrap_or(""),
        )
    }
    key(a).cmp(&key(b)).then_with(|| {
        let fa = a.variant_allele_frequency.unwrap_or(f64::NAN);
        let fb = b.variant_allele_frequency.unwrap_or(f64::NAN);
        fa.total_cmp(&fb)
    })
}
