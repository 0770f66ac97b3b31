//! Matching of drivers and characteristics against actionable events.

use crate::hgvs::protein::{protein_event, to_single_letter};
use crate::model::{
    AnnotatedPanelTest, ClinicalEvidence, CopyNumber, Fusion, MolecularCharacteristics,
    TreatmentEvidence, Variant, Virus,
};
use crate::reference::{EvidenceDatabase, EvidenceRule};

/// Attaches [`ClinicalEvidence`] to every driver and characteristic.
pub struct PanelEvidenceAnnotator<'a> {
    database: &'a EvidenceDatabase,
}

impl<'a> PanelEvidenceAnnotator<'a> {
    pub fn new(database: &'a EvidenceDatabase) -> Self {
        Self { database }
    }

    pub fn annotate(&self, test: AnnotatedPanelTest) -> AnnotatedPanelTest {
        let mut test = test;
        for variant in &mut test.drivers.variants {
            variant.evidence = self.collect(|rule| matches_variant(rule, variant));
        }
        for copy_number in &mut test.drivers.copy_numbers {
            copy_number.evidence = self.collect(|rule| matches_copy_number(rule, copy_number));
        }
        for fusion in &mut test.drivers.fusions {
            fusion.evidence = self.collect(|rule| matches_fusion(rule, fusion));
        }
        for virus in &mut test.drivers.viruses {
            virus.evidence = self.collect(|rule| matches_virus(rule, virus));
        }
        self.annotate_characteristics(&mut test.characteristics);
        test
    }

    fn annotate_characteristics(&self, characteristics: &mut MolecularCharacteristics) {
        if let Some(msi) = &mut characteristics.microsatellite_stability {
            let unstable = msi.is_unstable;
            msi.evidence = self.collect(|rule| {
                unstable && matches!(rule, EvidenceRule::MicrosatelliteUnstable)
            });
        }
        if let Some(hrd) = &mut characteristics.homologous_recombination {
            let deficient = hrd.is_deficient;
            hrd.evidence = self.collect(|rule| {
                deficient && matches!(rule, EvidenceRule::HomologousRecombinationDeficient)
            });
        }
        if let Some(tmb) = &mut characteristics.tumor_mutational_burden {
            let high = tmb.is_high;
            tmb.evidence = self.collect(|rule| {
                high && matches!(rule, EvidenceRule::TumorMutationalBurdenHigh)
            });
        }
    }

    fn collect(&self, matches: impl Fn(&EvidenceRule) -> bool) -> ClinicalEvidence {
        let found: Vec<TreatmentEvidence> = self
            .database
            .events()
            .iter()
            .filter(|event| matches(&event.rule))
            .map(|event| event.to_evidence())
            .collect();
        ClinicalEvidence::from_matches(found)
    }
}

fn same_protein_change(curated: &str, observed: &str) -> bool {
    let curated = to_single_letter(curated);
    match (protein_event(&curated), protein_event(observed)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn matches_variant(rule: &EvidenceRule, variant: &Variant) -> bool {
    match rule {
        EvidenceRule::Hotspot {
            gene,
            protein_impact,
        } => {
            *gene == variant.gene
                && same_protein_change(protein_impact, &variant.canonical_impact.hgvs_protein_impact)
        }
        EvidenceRule::GeneMutation { gene } => {
            *gene == variant.gene
                && variant
                    .canonical_impact
                    .coding_effect
                    .is_some_and(|e| e.is_protein_altering())
        }
        _ => false,
    }
}

fn matches_copy_number(rule: &EvidenceRule, copy_number: &CopyNumber) -> bool {
    let copy_number_type = copy_number.canonical_impact.copy_number_type;
    match rule {
        EvidenceRule::Amplification { gene } => {
            *gene == copy_number.gene && copy_number_type.is_gain()
        }
        EvidenceRule::Deletion { gene } => *gene == copy_number.gene && copy_number_type.is_deletion(),
        _ => false,
    }
}

fn matches_fusion(rule: &EvidenceRule, fusion: &Fusion) -> bool {
    match rule {
        EvidenceRule::FusionPair { gene_up, gene_down } => {
            *gene_up == fusion.gene_start && *gene_down == fusion.gene_end
        }
        EvidenceRule::PromiscuousFusion { gene } => {
            *gene == fusion.gene_start || *gene == fusion.gene_end
        }
        _ => false,
    }
}

fn matches_virus(rule: &EvidenceRule, virus: &Virus) -> bool {
    matches!(rule, EvidenceRule::Virus { virus_type } if *virus_type == virus.virus_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CodingEffect, Drivers, EvidenceDirection, EvidenceLevel, MicrosatelliteStability,
        PanelTargetSpecification, TumorMutationalBurden,
    };
    use crate::panel::test_support::variant;
    use crate::reference::ActionableEvent;

    fn event(rule: EvidenceRule, treatment: &str, level: EvidenceLevel) -> ActionableEvent {
        ActionableEvent {
            rule,
            treatment: treatment.to_string(),
            evidence_level: level,
            direction: EvidenceDirection::Responsive,
        }
    }

    fn database() -> EvidenceDatabase {
        EvidenceDatabase::new(vec![
            event(
                EvidenceRule::Hotspot {
                    gene: "BRAF".to_string(),
                    protein_impact: "p.Val600Glu".to_string(),
                },
                "Vemurafenib",
                EvidenceLevel::B,
            ),
            event(
                EvidenceRule::GeneMutation {
                    gene: "BRAF".to_string(),
                },
                "Dabrafenib",
                EvidenceLevel::A,
            ),
            event(EvidenceRule::MicrosatelliteUnstable, "Pembrolizumab", EvidenceLevel::A),
            event(EvidenceRule::TumorMutationalBurdenHigh, "Nivolumab", EvidenceLevel::B),
        ])
    }

    fn test_record(variants: Vec<Variant>) -> AnnotatedPanelTest {
        AnnotatedPanelTest {
            test_name: "panel".to_string(),
            drivers: Drivers {
                variants,
                ..Default::default()
            },
            characteristics: MolecularCharacteristics {
                microsatellite_stability: Some(MicrosatelliteStability {
                    is_unstable: true,
                    evidence: ClinicalEvidence::default(),
                }),
                homologous_recombination: None,
                tumor_mutational_burden: Some(TumorMutationalBurden {
                    score: 4.0,
                    is_high: false,
                    evidence: ClinicalEvidence::default(),
                }),
            },
            immunology: None,
            target_specification: PanelTargetSpecification::new(),
        }
    }

    #[test]
    fn test_variant_evidence_sorted() {
        let db = database();
        let annotator = PanelEvidenceAnnotator::new(&db);
        let record = annotator.annotate(test_record(vec![variant(
            "BRAF",
            "p.V600E",
            CodingEffect::Missense,
        )]));
        let evidence = &record.drivers.variants[0].evidence.treatment_evidence;
        let treatments: Vec<_> = evidence.iter().map(|e| e.treatment.as_str()).collect();
        assert_eq!(treatments, vec!["Dabrafenib", "Vemurafenib"]);
        assert_eq!(evidence[1].source_event, "BRAF V600E");
    }

    #[test]
    fn test_synonymous_variant_has_no_gene_evidence() {
        let db = database();
        let annotator = PanelEvidenceAnnotator::new(&db);
        let record = annotator.annotate(test_record(vec![variant(
            "BRAF",
            "p.V600=",
            CodingEffect::Synonymous,
        )]));
        assert!(record.drivers.variants[0].evidence.is_empty());
    }

    #[test]
    fn test_characteristic_evidence() {
        let db = database();
        let annotator = PanelEvidenceAnnotator::new(&db);
        let record = annotator.annotate(test_record(vec![]));
        let characteristics = &record.characteristics;
        let msi = characteristics.microsatellite_stability.as_ref().unwrap();
        assert_eq!(msi.evidence.treatment_evidence.len(), 1);
        let tmb = characteristics.tumor_mutational_burden.as_ref().unwrap();
        assert!(tmb.evidence.is_empty());
    }
}
