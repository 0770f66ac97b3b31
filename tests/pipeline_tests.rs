//! End-to-end tests of the panel annotation pipeline

use ferro_panel::annotation::{
    ExonCodon, FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
    GenomicCoordinate, TranscriptImpactEntry, TranscriptImpactResponse,
};
use ferro_panel::model::{
    CodingEffect, CopyNumberType, DriverLikelihood, EvidenceDirection, EvidenceLevel,
    FusionDriverType, GeneRole, MolecularTestTarget, PanelTargetSpecification, PanelTestResult,
    ProteinEffect, SequencedAmplification, SequencedDeletion, SequencedFusion,
    SequencedSkippedExons, SequencedVariant, SequencedVirus, VariantEffect, VariantType,
    VirusType,
};
use ferro_panel::reference::{
    ActionableEvent, CuratedAlteration, EnsemblDataCache, EvidenceDatabase, EvidenceRule,
    GeneKnowledgeBase, KnownFusionCache, KnownFusionType, VariantDecomposition,
    VariantDecompositionIndex,
};
use ferro_panel::{PanelAnnotator, PanelError, ReferenceData};
use rstest::rstest;

const BRAF_CANONICAL: &str = "ENST00000288602";
const ERBB2_CANONICAL: &str = "ENST00000269571";

fn impact_entry(
    gene: &str,
    transcript: &str,
    coding: &str,
    protein: &str,
    effect: VariantEffect,
    coding_effect: CodingEffect,
) -> TranscriptImpactEntry {
    TranscriptImpactEntry {
        gene: gene.to_string(),
        transcript_id: transcript.to_string(),
        hgvs_coding_impact: coding.to_string(),
        hgvs_protein_impact: protein.to_string(),
        is_splice_region: false,
        effects: [effect].into_iter().collect(),
        coding_effect: Some(coding_effect),
    }
}

fn reference() -> ReferenceData {
    ReferenceData {
        decompositions: VariantDecompositionIndex::new(vec![VariantDecomposition {
            hgvs: "c.1798_1799delinsAA".to_string(),
            fragments: vec!["c.1798G>A".to_string(), "c.1799T>A".to_string()],
        }]),
        ensembl: EnsemblDataCache::new()
            .with_transcript("ENSG00000157764", "BRAF", BRAF_CANONICAL, true)
            .with_transcript("ENSG00000141736", "ERBB2", ERBB2_CANONICAL, true)
            .with_transcript("ENSG00000141736", "ERBB2", "ENST00000406381", false)
            .with_transcript("ENSG00000147889", "CDKN2A", "ENST00000304494", true)
            .with_transcript("ENSG00000105976", "MET", "ENST00000397752", true),
        known_fusions: KnownFusionCache::new()
            .with_entry(KnownFusionType::KnownPair, "EML4", "ALK")
            .with_entry(KnownFusionType::ExonDelDup, "EGFR", "EGFR")
            .with_entry(KnownFusionType::ExonDelDup, "MET", "MET")
            .with_entry(KnownFusionType::Promiscuous5, "KMT2A", "")
            .with_entry(KnownFusionType::Promiscuous3, "", "ALK")
            .with_entry(KnownFusionType::Promiscuous3, "", "NTRK1"),
        knowledge_base: GeneKnowledgeBase::new()
            .with_gene("BRAF", GeneRole::Onco)
            .with_gene("ERBB2", GeneRole::Onco)
            .with_gene("CDKN2A", GeneRole::Tsg)
            .with_hotspot(
                "BRAF",
                "p.Val600Glu",
                CuratedAlteration {
                    protein_effect: ProteinEffect::GainOfFunction,
                    is_associated_with_drug_resistance: Some(false),
                },
            ),
        evidence: EvidenceDatabase::new(vec![ActionableEvent {
            rule: EvidenceRule::Hotspot {
                gene: "BRAF".to_string(),
                protein_impact: "p.V600E".to_string(),
            },
            treatment: "Vemurafenib".to_string(),
            evidence_level: EvidenceLevel::A,
            direction: EvidenceDirection::Responsive,
        }]),
    }
}

struct Collaborators {
    resolver: FileVariantResolver,
    impacts: FileTranscriptImpactAnnotator,
    exon_codons: FileExonCodonLookup,
}

fn collaborators() -> Collaborators {
    let v600e = GenomicCoordinate::new("7", 140453136, "A", "T");
    let fragment = GenomicCoordinate::new("7", 140453137, "C", "T");

    let mut resolver = FileVariantResolver::new();
    resolver.add_resolution("BRAF", "c.1799T>A", v600e.clone());
    resolver.add_resolution("BRAF", "c.1798G>A", fragment.clone());
    resolver.add_resolution(
        "BRAF",
        "c.1798_1799delinsAA",
        GenomicCoordinate::new("7", 140453136, "AC", "TT"),
    );

    let mut impacts = FileTranscriptImpactAnnotator::new();
    impacts.add_impact(
        v600e,
        TranscriptImpactResponse {
            canonical: impact_entry(
                "BRAF",
                BRAF_CANONICAL,
                "c.1799T>A",
                "p.Val600Glu",
                VariantEffect::Missense,
                CodingEffect::Missense,
            ),
            others: vec![],
        },
    );
    impacts.add_impact(
        fragment,
        TranscriptImpactResponse {
            canonical: impact_entry(
                "BRAF",
                BRAF_CANONICAL,
                "c.1798G>A",
                "p.Val600Glu",
                VariantEffect::PhasedMissense,
                CodingEffect::Missense,
            ),
            others: vec![],
        },
    );

    let mut exon_codons = FileExonCodonLookup::new();
    exon_codons.add("BRAF", BRAF_CANONICAL, 140453136, ExonCodon::new(Some(15), Some(600)));
    exon_codons.add("BRAF", BRAF_CANONICAL, 140453137, ExonCodon::new(Some(15), Some(600)));

    Collaborators {
        resolver,
        impacts,
        exon_codons,
    }
}

#[test]
fn test_braf_v600e_end_to_end() {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-1");
    result
        .variants
        .push(SequencedVariant::coding("BRAF", "c.1799T>A").with_allele_frequency(0.32));
    let record = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap();

    assert_eq!(record.drivers.variants.len(), 1);
    let variant = &record.drivers.variants[0];
    assert_eq!(variant.gene, "BRAF");
    assert_eq!(variant.variant_type, VariantType::Snv);
    assert_eq!(variant.canonical_impact.transcript_id, BRAF_CANONICAL);
    assert_eq!(variant.canonical_impact.hgvs_protein_impact, "p.V600E");
    assert_eq!(variant.canonical_impact.affected_codon, Some(600));
    assert_eq!(variant.event, "BRAF V600E");
    assert!(variant.is_hotspot);
    assert_eq!(variant.gene_role, GeneRole::Onco);
    assert_eq!(variant.protein_effect, ProteinEffect::GainOfFunction);
    assert_eq!(variant.driver_likelihood, Some(DriverLikelihood::High));
    assert_eq!(variant.evidence.treatment_evidence.len(), 1);
    assert_eq!(variant.evidence.treatment_evidence[0].treatment, "Vemurafenib");
}

#[test]
fn test_phased_call_collapses_to_single_variant() {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-phased");
    result
        .variants
        .push(SequencedVariant::coding("BRAF", "c.1798_1799delinsAA"));
    let record = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap();

    assert_eq!(record.drivers.variants.len(), 1);
    let variant = &record.drivers.variants[0];
    assert_eq!(variant.variant_type, VariantType::Mnv);
    assert_eq!(variant.ref_allele, "AC");
    assert_eq!(variant.canonical_impact.hgvs_coding_impact, "c.1798_1799delinsAA");
    assert!(variant
        .canonical_impact
        .effects
        .iter()
        .all(|effect| !effect.is_phased()));
}

#[test]
fn test_variant_calls_have_set_semantics() {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let v600e = SequencedVariant::coding("BRAF", "c.1799T>A").with_allele_frequency(0.32);
    let phased = SequencedVariant::coding("BRAF", "c.1798_1799delinsAA");

    let mut forward = PanelTestResult::new("panel-set");
    forward.variants = vec![v600e.clone(), phased.clone()];
    let mut shuffled = PanelTestResult::new("panel-set");
    shuffled.variants = vec![phased.clone(), v600e.clone(), phased, v600e];

    let targets = PanelTargetSpecification::new();
    let forward = annotator.annotate(&forward, &targets).unwrap();
    let shuffled = annotator.annotate(&shuffled, &targets).unwrap();
    assert_eq!(forward.drivers.variants.len(), 2);
    assert_eq!(forward, shuffled);
}

#[test]
fn test_inconsistent_phase_set_fails_whole_test() {
    let reference = reference();
    let mut c = collaborators();
    c.impacts.add_impact(
        GenomicCoordinate::new("7", 140453137, "C", "T"),
        TranscriptImpactResponse {
            canonical: impact_entry(
                "BRAF",
                BRAF_CANONICAL,
                "c.1798G>A",
                "p.Val600Met",
                VariantEffect::PhasedMissense,
                CodingEffect::Missense,
            ),
            others: vec![],
        },
    );
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-bad");
    result
        .variants
        .push(SequencedVariant::coding("BRAF", "c.1798_1799delinsAA"));
    result.amplifications.push(SequencedAmplification {
        gene: "ERBB2".to_string(),
        copies: Some(8),
        ..Default::default()
    });
    let err = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap_err();
    assert!(matches!(err, PanelError::PhaseSetProteinMismatch { .. }));
}

#[rstest]
#[case(Some(ERBB2_CANONICAL), false, CopyNumberType::FullGain, 0)]
#[case(None, false, CopyNumberType::FullGain, 0)]
#[case(None, true, CopyNumberType::PartialGain, 0)]
#[case(Some("ENST00000406381"), false, CopyNumberType::None, 1)]
fn test_amplification_transcripts(
    #[case] transcript: Option<&str>,
    #[case] is_partial: bool,
    #[case] canonical_type: CopyNumberType,
    #[case] other_impacts: usize,
) {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-cn");
    result.amplifications.push(SequencedAmplification {
        gene: "ERBB2".to_string(),
        transcript: transcript.map(str::to_string),
        copies: Some(6),
        is_partial,
    });
    let record = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap();
    let copy_number = &record.drivers.copy_numbers[0];
    assert_eq!(copy_number.canonical_impact.transcript_id, ERBB2_CANONICAL);
    assert_eq!(copy_number.canonical_impact.copy_number_type, canonical_type);
    assert_eq!(copy_number.other_impacts.len(), other_impacts);
    assert_eq!(copy_number.driver_likelihood, Some(DriverLikelihood::High));
    assert!(copy_number.is_reportable);
}

#[test]
fn test_deletion_protein_effect() {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-del");
    result.deletions.push(SequencedDeletion {
        gene: "CDKN2A".to_string(),
        transcript: None,
        is_partial: true,
    });
    let record = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap();
    let copy_number = &record.drivers.copy_numbers[0];
    assert_eq!(copy_number.canonical_impact.copy_number_type, CopyNumberType::PartialDel);
    assert_eq!(copy_number.canonical_impact.max_copies, Some(1));
    assert_eq!(copy_number.protein_effect, ProteinEffect::LossOfFunctionPredicted);
    assert_eq!(copy_number.event, "CDKN2A del");
}

#[rstest]
#[case("EML4", "ALK", FusionDriverType::KnownPair, DriverLikelihood::High)]
#[case("EGFR", "EGFR", FusionDriverType::KnownPairDelDup, DriverLikelihood::High)]
#[case("KMT2A", "NTRK1", FusionDriverType::PromiscuousBoth, DriverLikelihood::Low)]
#[case("KMT2A", "FOO", FusionDriverType::Promiscuous5, DriverLikelihood::Low)]
#[case("BAR", "ALK", FusionDriverType::Promiscuous3, DriverLikelihood::Low)]
#[case("FOO", "BAR", FusionDriverType::None, DriverLikelihood::Low)]
fn test_fusion_classification(
    #[case] up: &str,
    #[case] down: &str,
    #[case] driver_type: FusionDriverType,
    #[case] likelihood: DriverLikelihood,
) {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-fusion");
    result.fusions.push(SequencedFusion::pair(up, down));
    let record = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap();
    let fusion = &record.drivers.fusions[0];
    assert_eq!(fusion.driver_type, driver_type);
    assert_eq!(fusion.driver_likelihood, Some(likelihood));
    assert_eq!(fusion.event, format!("{}::{} fusion", up, down));
}

#[test]
fn test_exon_skip_and_virus() {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-misc");
    result.skipped_exons.push(SequencedSkippedExons {
        gene: "MET".to_string(),
        exon_start: 14,
        exon_end: 14,
        transcript: None,
    });
    result.viruses.push(SequencedVirus {
        virus_type: VirusType::HumanPapillomaVirus,
        is_low_risk: false,
        integrated_virus: None,
    });
    let spec = PanelTargetSpecification::new().with_gene("MET", [MolecularTestTarget::Fusion]);
    let record = annotator.annotate(&result, &spec).unwrap();

    let fusion = &record.drivers.fusions[0];
    assert_eq!(fusion.event, "MET exon 14 skip");
    assert_eq!(fusion.driver_type, FusionDriverType::KnownPairDelDup);
    assert_eq!(fusion.gene_transcript_start.as_deref(), Some("ENST00000397752"));
    assert_eq!((fusion.fused_exon_up, fusion.fused_exon_down), (Some(13), Some(15)));
    assert_eq!(fusion.protein_effect, ProteinEffect::GainOfFunctionPredicted);

    let virus = &record.drivers.viruses[0];
    assert_eq!(virus.event, "HPV positive");
    assert_eq!(virus.driver_likelihood, Some(DriverLikelihood::High));
}

#[test]
fn test_record_serializes_to_json() {
    let reference = reference();
    let c = collaborators();
    let annotator = PanelAnnotator::new(&reference, &c.resolver, &c.impacts, &c.exon_codons);

    let mut result = PanelTestResult::new("panel-json");
    result.variants.push(SequencedVariant::coding("BRAF", "c.1799T>A"));
    result.tumor_mutational_burden = Some(14.0);
    let record = annotator
        .annotate(&result, &PanelTargetSpecification::new())
        .unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["drivers"]["variants"][0]["variant_type"], "SNV");
    assert_eq!(json["drivers"]["variants"][0]["driver_likelihood"], "HIGH");
    assert_eq!(json["characteristics"]["tumor_mutational_burden"]["is_high"], true);
}
