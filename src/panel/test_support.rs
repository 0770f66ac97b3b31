//! Builders shared by the unit tests of this module.

use crate::model::{
    ClinicalEvidence, CodingEffect, GeneRole, ProteinEffect, TranscriptVariantImpact, Variant,
    VariantType,
};

/// A finalized SNV on `ENST1` with the given protein impact and coding effect
pub(crate) fn variant(gene: &str, protein: &str, coding_effect: CodingEffect) -> Variant {
    Variant {
        gene: gene.to_string(),
        chromosome: "1".to_string(),
        position: 100,
        ref_allele: "A".to_string(),
        alt_allele: "T".to_string(),
        variant_type: VariantType::Snv,
        variant_allele_frequency: None,
        canonical_impact: TranscriptVariantImpact {
            transcript_id: "ENST1".to_string(),
            hgvs_coding_impact: "c.1A>T".to_string(),
            hgvs_protein_impact: protein.to_string(),
            affected_codon: None,
            affected_exon: None,
            is_splice_region: false,
            effects: Default::default(),
            coding_effect: Some(coding_effect),
        },
        other_impacts: vec![],
        event: format!("{} {}", gene, protein.trim_start_matches("p.")),
        is_reportable: true,
        is_hotspot: false,
        is_cancer_associated_variant: false,
        driver_likelihood: None,
        gene_role: GeneRole::Unknown,
        protein_effect: ProteinEffect::Unknown,
        is_associated_with_drug_resistance: None,
        evidence: ClinicalEvidence::default(),
    }
}
