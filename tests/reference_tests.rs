//! Loading reference tables and configuration from disk

use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use ferro_panel::annotation::{
    ExonCodonLookup, FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
    GenomicCoordinate, ImpactQuery, TranscriptImpactAnnotator, VariantResolver,
};
use ferro_panel::config::{PanelConfig, ReferenceConfig};
use ferro_panel::model::{GeneRole, PanelTargetSpecification, PanelTestResult};
use ferro_panel::reference::{EnsemblDataCache, KnownFusionCache, VariantDecompositionIndex};
use ferro_panel::{ErrorCode, PanelAnnotator, ReferenceData};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_gz(path: &Path, content: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

const ENSEMBL: &str = "gene_id\tgene_name\ttranscript_id\tis_canonical\n\
ENSG00000157764\tBRAF\tENST00000288602\ttrue\n\
ENSG00000157764\tBRAF\tENST00000496384\tfalse\n\
ENSG00000141736\tERBB2\tENST00000269571\t1\n";

const FUSIONS: &str = "type\tfive_gene\tthree_gene\n\
KNOWN_PAIR\tEML4\tALK\n\
EXON_DEL_DUP\tEGFR\tEGFR\n\
PROMISCUOUS_5\tKMT2A\t\n\
PROMISCUOUS_3\t\tNTRK1\n\
IG_KNOWN_PAIR\tIGH\tMYC\n";

const DECOMPOSITIONS: &str = "hgvs\tdecomposition\n\
# BRAF V600K\n\
c.1798_1799delinsAA\tc.1798G>A,c.1799T>A\n";

#[test]
fn test_load_gzipped_ensembl() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ensembl.tsv.gz");
    write_gz(&path, ENSEMBL);

    let cache = EnsemblDataCache::from_path(&path).unwrap();
    assert_eq!(cache.gene_count(), 2);
    assert_eq!(cache.canonical_transcript_id("BRAF").unwrap(), "ENST00000288602");
    assert_eq!(cache.canonical_transcript_id("ERBB2").unwrap(), "ENST00000269571");
    let err = cache.canonical_transcript_id("NOPE").unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownGene);
}

#[test]
fn test_load_known_fusions() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "fusions.tsv", FUSIONS);
    let cache = KnownFusionCache::from_path(&path).unwrap();
    assert!(cache.has_known_fusion("EML4", "ALK"));
    assert!(!cache.has_known_fusion("ALK", "EML4"));
    assert!(cache.has_exon_del_dup("EGFR"));
    assert!(cache.has_promiscuous_five_gene("KMT2A"));
    assert!(cache.has_promiscuous_three_gene("NTRK1"));
    assert!(!cache.has_known_fusion("IGH", "MYC"));
}

#[test]
fn test_load_decompositions() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "decompositions.tsv", DECOMPOSITIONS);
    let index = VariantDecompositionIndex::from_path(&path).unwrap();
    assert_eq!(
        index.lookup("c.1798_1799delinsAA").unwrap(),
        &["c.1798G>A".to_string(), "c.1799T>A".to_string()]
    );
    assert!(index.lookup("c.1799T>A").is_none());
}

#[test]
fn test_malformed_table_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.tsv", "gene_id\tgene_name\ttranscript_id\tis_canonical\nENSG1\tFOO\n");
    let err = EnsemblDataCache::from_path(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedReference);
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = KnownFusionCache::from_path(&dir.path().join("missing.tsv")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IoError);
}

#[test]
fn test_reference_data_from_config() {
    let dir = TempDir::new().unwrap();
    let ensembl_path = dir.path().join("ensembl.tsv.gz");
    write_gz(&ensembl_path, ENSEMBL);
    let config = ReferenceConfig {
        decomposition_path: Some(write(&dir, "decompositions.tsv", DECOMPOSITIONS)),
        ensembl_path: Some(ensembl_path),
        known_fusion_path: Some(write(&dir, "fusions.tsv", FUSIONS)),
        knowledge_base_path: Some(write(
            &dir,
            "knowledge.json",
            r#"{"genes": [{"gene": "BRAF", "role": "ONCO"}],
                "hotspots": [{"gene": "BRAF", "protein_impact": "p.Val600Glu",
                              "protein_effect": "GAIN_OF_FUNCTION"}]}"#,
        )),
        evidence_path: Some(write(
            &dir,
            "evidence.json",
            r#"[{"rule": {"type": "AMPLIFICATION", "gene": "ERBB2"},
                 "treatment": "Trastuzumab", "evidence_level": "A", "direction": "RESPONSIVE"}]"#,
        )),
    };

    let reference = ReferenceData::load(&config).unwrap();
    assert_eq!(reference.decompositions.len(), 1);
    assert_eq!(reference.ensembl.gene_count(), 2);
    assert!(reference.known_fusions.has_known_fusion("EML4", "ALK"));
    assert_eq!(reference.knowledge_base.gene_role("BRAF"), Some(GeneRole::Onco));
    assert!(reference.knowledge_base.hotspot("BRAF", "p.V600E").is_some());
    assert_eq!(reference.evidence.len(), 1);
}

#[test]
fn test_file_collaborators_from_json() {
    let dir = TempDir::new().unwrap();
    let resolutions = write(
        &dir,
        "resolutions.json",
        r#"[{"gene": "BRAF", "hgvs": "c.1799T>A",
             "coordinate": {"chromosome": "7", "position": 140453136,
                            "ref_allele": "A", "alt_allele": "T"}}]"#,
    );
    let impacts = write(
        &dir,
        "impacts.json",
        r#"[{"coordinate": {"chromosome": "7", "position": 140453136,
                            "ref_allele": "A", "alt_allele": "T"},
             "impact": {"canonical": {"gene": "BRAF", "transcript_id": "ENST00000288602",
                                      "hgvs_coding_impact": "c.1799T>A",
                                      "hgvs_protein_impact": "p.Val600Glu",
                                      "effects": ["MISSENSE"], "coding_effect": "MISSENSE"}}}]"#,
    );
    let exon_codons = write(
        &dir,
        "exon_codons.json",
        r#"[{"gene": "BRAF", "transcript": "ENST00000288602", "position": 140453136,
             "exon": 15, "codon": 600}]"#,
    );

    let resolver = FileVariantResolver::from_json(&resolutions).unwrap();
    let coordinate = resolver.resolve("BRAF", None, "c.1799T>A").unwrap();
    assert_eq!(coordinate, GenomicCoordinate::new("7", 140453136, "A", "T"));

    let annotator = FileTranscriptImpactAnnotator::from_json(&impacts).unwrap();
    let responses = annotator
        .run(&[ImpactQuery { id: 4, coordinate }])
        .unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].id, 4);

    let lookup = FileExonCodonLookup::from_json(&exon_codons).unwrap();
    let exon_codon = lookup.run("BRAF", "ENST00000288602", 140453136).unwrap();
    assert_eq!((exon_codon.exon, exon_codon.codon), (Some(15), Some(600)));

    let reference = ReferenceData::default();
    let panel = PanelAnnotator::new(&reference, &resolver, &annotator, &lookup);
    let record = panel
        .annotate(&PanelTestResult::new("empty"), &PanelTargetSpecification::new())
        .unwrap();
    assert!(record.drivers.is_empty());
}

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.toml");
    let mut config = PanelConfig::sample();
    config.annotation.tmb_high_threshold = 16.0;
    config.to_file(&path).unwrap();
    let loaded = PanelConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}
