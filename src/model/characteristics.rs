//! Sample-level molecular characteristics and immunology.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::evidence::ClinicalEvidence;

/// Microsatellite stability status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrosatelliteStability {
    pub is_unstable: bool,
    pub evidence: ClinicalEvidence,
}

/// Homologous recombination status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomologousRecombination {
    pub is_deficient: bool,
    pub evidence: ClinicalEvidence,
}

/// Tumor mutational burden with its derived high/low call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TumorMutationalBurden {
    pub score: f64,
    pub is_high: bool,
    pub evidence: ClinicalEvidence,
}

/// Characteristics derived from a panel run; each is absent when not reported
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MolecularCharacteristics {
    pub microsatellite_stability: Option<MicrosatelliteStability>,
    pub homologous_recombination: Option<HomologousRecombination>,
    pub tumor_mutational_burden: Option<TumorMutationalBurden>,
}

/// A typed HLA allele.
///
/// Equality and ordering share one total order; the copy number is compared
/// with `f64::total_cmp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlaAllele {
    /// Normalized name without the "HLA-" prefix (e.g., "A*02:01")
    pub name: String,
    pub gene: String,
    pub tumor_copy_number: Option<f64>,
    pub has_somatic_mutations: Option<bool>,
}

impl PartialEq for HlaAllele {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HlaAllele {}

impl PartialOrd for HlaAllele {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HlaAllele {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.gene.cmp(&other.gene))
            .then_with(|| match (self.tumor_copy_number, other.tumor_copy_number) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            })
            .then_with(|| self.has_somatic_mutations.cmp(&other.has_somatic_mutations))
    }
}

/// HLA typing of a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularImmunology {
    pub is_reliable: bool,
    pub hla_alleles: BTreeSet<HlaAllele>,
}
