//! Enrichment of drivers with curated gene knowledge.

use std::collections::BTreeMap;

use crate::model::{CopyNumber, Drivers, Fusion, ProteinEffect, Variant};
use crate::reference::{GeneKnowledgeBase, KnownCopyNumberDirection};

use super::likelihood::{is_truncating, GeneDriverLikelihoodModel};

/// Sets gene role, protein effect, drug-resistance association and variant
/// driver likelihood from the [`GeneKnowledgeBase`].
pub struct PanelDriverAttributeAnnotator<'a> {
    knowledge_base: &'a GeneKnowledgeBase,
}

impl<'a> PanelDriverAttributeAnnotator<'a> {
    pub fn new(knowledge_base: &'a GeneKnowledgeBase) -> Self {
        Self { knowledge_base }
    }

    pub fn annotate(&self, drivers: Drivers) -> Drivers {
        Drivers {
            variants: self.annotate_variants(drivers.variants),
            copy_numbers: drivers
                .copy_numbers
                .into_iter()
                .map(|cn| self.annotate_copy_number(cn))
                .collect(),
            fusions: drivers
                .fusions
                .into_iter()
                .map(|f| self.annotate_fusion(f))
                .collect(),
            viruses: drivers.viruses,
        }
    }

    /// Per-variant attributes, then one likelihood per gene applied to all of
    /// its variants
    pub fn annotate_variants(&self, variants: Vec<Variant>) -> Vec<Variant> {
        let mut variants: Vec<Variant> = variants
            .into_iter()
            .map(|v| self.annotate_variant(v))
            .collect();

        let model = GeneDriverLikelihoodModel::new(self.knowledge_base);
        let mut by_gene: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (index, variant) in variants.iter().enumerate() {
            by_gene.entry(variant.gene.clone()).or_default().push(index);
        }
        for (gene, indices) in by_gene {
            let members: Vec<&Variant> = indices.iter().map(|&i| &variants[i]).collect();
            let likelihood = model.evaluate(&gene, &members);
            for i in indices {
                variants[i].driver_likelihood = likelihood;
            }
        }
        variants
    }

    fn annotate_variant(&self, variant: Variant) -> Variant {
        let role = self.knowledge_base.gene_role(&variant.gene).unwrap_or_default();
        let hotspot = self
            .knowledge_base
            .hotspot(&variant.gene, &variant.canonical_impact.hgvs_protein_impact)
            .copied();

        let (protein_effect, resistance) = match hotspot {
            Some(curated) => (curated.protein_effect, curated.is_associated_with_drug_resistance),
            None if role.is_tumor_suppressor() && is_truncating(&variant) => {
                (ProteinEffect::LossOfFunctionPredicted, None)
            }
            None => (ProteinEffect::Unknown, None),
        };
        Variant {
            is_hotspot: hotspot.is_some(),
            is_cancer_associated_variant: hotspot.is_some(),
            gene_role: role,
            protein_effect,
            is_associated_with_drug_resistance: resistance,
            ..variant
        }
    }

    pub fn annotate_copy_number(&self, copy_number: CopyNumber) -> CopyNumber {
        let role = self
            .knowledge_base
            .gene_role(&copy_number.gene)
            .unwrap_or_default();
        let copy_number_type = copy_number.canonical_impact.copy_number_type;
        let direction = match copy_number_type {
            t if t.is_gain() => Some(KnownCopyNumberDirection::Gain),
            t if t.is_deletion() => Some(KnownCopyNumberDirection::Loss),
            _ => None,
        };
        let curated = direction
            .and_then(|d| self.knowledge_base.copy_number(&copy_number.gene, d))
            .copied();

        let (protein_effect, resistance) = match curated {
            Some(curated) => (curated.protein_effect, curated.is_associated_with_drug_resistance),
            None if copy_number_type.is_gain() && role.is_oncogene() => {
                (ProteinEffect::GainOfFunctionPredicted, None)
            }
            None if copy_number_type.is_deletion() && role.is_tumor_suppressor() => {
                (ProteinEffect::LossOfFunctionPredicted, None)
            }
            None => (ProteinEffect::Unknown, None),
        };
        CopyNumber {
            gene_role: role,
            protein_effect,
            is_associated_with_drug_resistance: resistance,
            ..copy_number
        }
    }

    pub fn annotate_fusion(&self, fusion: Fusion) -> Fusion {
        let curated = self
            .knowledge_base
            .fusion(&fusion.gene_start, &fusion.gene_end)
            .copied();
        let (protein_effect, resistance) = match curated {
            Some(curated) => (curated.protein_effect, curated.is_associated_with_drug_resistance),
            None if fusion.driver_type.is_known_pair() => {
                (ProteinEffect::GainOfFunctionPredicted, None)
            }
            None => (ProteinEffect::Unknown, None),
        };
        Fusion {
            protein_effect,
            is_associated_with_drug_resistance: resistance,
            ..fusion
        }
    }
}
