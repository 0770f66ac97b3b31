//! Gene-level driver likelihood of small variants.

use crate::model::{CodingEffect, DriverLikelihood, Variant, VariantEffect};
use crate::reference::GeneKnowledgeBase;

/// Evaluates all variants of one gene together.
///
/// | condition                                              | likelihood |
/// |--------------------------------------------------------|------------|
/// | gene not in the knowledge base                         | none       |
/// | any curated hotspot                                    | HIGH       |
/// | TSG/BOTH with a nonsense, frameshift or splice variant | HIGH       |
/// | TSG/BOTH with two or more protein-altering variants    | MEDIUM     |
/// | ONCO/BOTH with a missense or inframe variant           | MEDIUM     |
/// | otherwise                                              | LOW        |
pub struct GeneDriverLikelihoodModel<'a> {
    knowledge_base: &'a GeneKnowledgeBase,
}

impl<'a> GeneDriverLikelihoodModel<'a> {
    pub fn new(knowledge_base: &'a GeneKnowledgeBase) -> Self {
        Self { knowledge_base }
    }

    pub fn evaluate(&self, gene: &str, variants: &[&Variant]) -> Option<DriverLikelihood> {
        let role = self.knowledge_base.gene_role(gene)?;

        let has_hotspot = variants.iter().any(|v| {
            self.knowledge_base
                .hotspot(gene, &v.canonical_impact.hgvs_protein_impact)
                .is_some()
        });
        if has_hotspot {
            return Some(DriverLikelihood::High);
        }

        let is_tsg = role.is_tumor_suppressor();
        let is_onco = role.is_oncogene();

        if is_tsg && variants.iter().any(|v| is_truncating(v)) {
            return Some(DriverLikelihood::High);
        }
        let protein_altering = variants
            .iter()
            .filter(|v| {
                v.canonical_impact
                    .coding_effect
                    .is_some_and(|e| e.is_protein_altering())
            })
            .count();
        if is_tsg && protein_altering >= 2 {
            return Some(DriverLikelihood::Medium);
        }
        if is_onco && variants.iter().any(|v| is_missense_or_inframe(v)) {
            return Some(DriverLikelihood::Medium);
        }
        Some(DriverLikelihood::Low)
    }
}

/// Nonsense, frameshift or splice on the canonical transcript
pub(crate) fn is_truncating(variant: &Variant) -> bool {
    matches!(
        variant.canonical_impact.coding_effect,
        Some(CodingEffect::NonsenseOrFrameshift) | Some(CodingEffect::Splice)
    )
}

fn is_missense_or_inframe(variant: &Variant) -> bool {
    variant.canonical_impact.coding_effect == Some(CodingEffect::Missense)
        || variant.canonical_impact.effects.iter().any(|e| {
            matches!(
                e,
                VariantEffect::Missense
                    | VariantEffect::InframeInsertion
                    | VariantEffect::InframeDeletion
            )
        })
}
