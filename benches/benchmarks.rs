//! Performance benchmarks for ferro-panel
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- expansion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_panel::annotation::{
    ExonCodon, FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
    GenomicCoordinate, TranscriptImpactEntry, TranscriptImpactResponse,
};
use ferro_panel::hgvs::protein::to_single_letter;
use ferro_panel::model::{
    CodingEffect, PanelTargetSpecification, PanelTestResult, SequencedAmplification,
    SequencedVariant, VariantEffect,
};
use ferro_panel::panel::VariantDecompositionExpander;
use ferro_panel::reference::{EnsemblDataCache, VariantDecompositionIndex};
use ferro_panel::{PanelAnnotator, ReferenceData};

const GENE: &str = "GENE";
const TRANSCRIPT: &str = "ENST00000000001";

/// Synthetic collaborators answering `n` missense variants at codons 1..=n
fn collaborators(
    n: u64,
) -> (
    FileVariantResolver,
    FileTranscriptImpactAnnotator,
    FileExonCodonLookup,
) {
    let mut resolver = FileVariantResolver::new();
    let mut impacts = FileTranscriptImpactAnnotator::new();
    let mut exon_codons = FileExonCodonLookup::new();
    for codon in 1..=n {
        let coding = format!("c.{}A>G", codon * 3);
        let coordinate = GenomicCoordinate::new("1", 1_000_000 + codon * 3, "A", "G");
        resolver.add_resolution(GENE, coding.clone(), coordinate.clone());
        impacts.add_impact(
            coordinate.clone(),
            TranscriptImpactResponse {
                canonical: TranscriptImpactEntry {
                    gene: GENE.to_string(),
                    transcript_id: TRANSCRIPT.to_string(),
                    hgvs_coding_impact: coding,
                    hgvs_protein_impact: format!("p.Lys{}Arg", codon),
                    is_splice_region: false,
                    effects: [VariantEffect::Missense].into_iter().collect(),
                    coding_effect: Some(CodingEffect::Missense),
                },
                others: vec![],
            },
        );
        exon_codons.add(
            GENE,
            TRANSCRIPT,
            coordinate.position,
            ExonCodon::new(Some(1 + (codon / 50) as u32), Some(codon as u32)),
        );
    }
    (resolver, impacts, exon_codons)
}

fn panel_result(n: u64) -> PanelTestResult {
    let mut result = PanelTestResult::new("bench");
    result.variants = (1..=n)
        .map(|codon| {
            SequencedVariant::coding(GENE, format!("c.{}A>G", codon * 3))
                .with_protein_impact(format!("p.K{}R", codon))
                .with_allele_frequency(0.3)
        })
        .collect();
    result.amplifications = vec![SequencedAmplification {
        gene: GENE.to_string(),
        transcript: None,
        is_partial: false,
        copies: Some(8),
    }];
    result
}

// =============================================================================
// Pipeline stages
// =============================================================================

fn bench_expansion(c: &mut Criterion) {
    let decompositions = VariantDecompositionIndex::default();
    let expander = VariantDecompositionExpander::new(&decompositions);
    let mut group = c.benchmark_group("expansion");

    for n in [10u64, 100, 1000] {
        let variants = panel_result(n).variants;
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::new("variants", n), &variants, |b, v| {
            b.iter(|| expander.expand(black_box(v)))
        });
    }

    group.finish();
}

fn bench_protein_notation(c: &mut Criterion) {
    let impacts = ["p.Val600Glu", "p.Gly12_Gly13delinsAspAsp", "p.Arg273fsTer15", "p.V600E"];
    c.bench_function("to_single_letter", |b| {
        b.iter(|| {
            for impact in &impacts {
                black_box(to_single_letter(black_box(impact)));
            }
        })
    });
}

fn bench_annotate(c: &mut Criterion) {
    let reference = ReferenceData {
        ensembl: EnsemblDataCache::new().with_transcript("ENSG00000000001", GENE, TRANSCRIPT, true),
        ..Default::default()
    };
    let targets = PanelTargetSpecification::new();
    let mut group = c.benchmark_group("annotate");

    for n in [10u64, 100, 500] {
        let (resolver, impacts, exon_codons) = collaborators(n);
        let annotator = PanelAnnotator::new(&reference, &resolver, &impacts, &exon_codons);
        let result = panel_result(n);
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::new("variants", n), &result, |b, r| {
            b.iter(|| annotator.annotate(black_box(r), &targets))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_expansion, bench_protein_notation, bench_annotate);
criterion_main!(benches);
