//! Annotated driver records: variants, copy numbers, fusions and viruses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::evidence::ClinicalEvidence;

/// Transcript-level effect of a small variant.
///
/// The `Phased*` forms are reported for fragments of a multi-nucleotide event
/// whose effect depends on the other fragments in the same phase set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantEffect {
    StopGained,
    StopLost,
    StartLost,
    Frameshift,
    SpliceAcceptor,
    SpliceDonor,
    InframeInsertion,
    InframeDeletion,
    Missense,
    PhasedMissense,
    PhasedInframeInsertion,
    PhasedInframeDeletion,
    Synonymous,
    PhasedSynonymous,
    Intronic,
    FivePrimeUtr,
    ThreePrimeUtr,
    UpstreamGene,
    NonCodingTranscript,
    Other,
}

impl VariantEffect {
    /// Sequence Ontology style term
    pub fn so_term(&self) -> &'static str {
        match self {
            VariantEffect::StopGained => "stop_gained",
            VariantEffect::StopLost => "stop_lost",
            VariantEffect::StartLost => "start_lost",
            VariantEffect::Frameshift => "frameshift_variant",
            VariantEffect::SpliceAcceptor => "splice_acceptor_variant",
            VariantEffect::SpliceDonor => "splice_donor_variant",
            VariantEffect::InframeInsertion => "inframe_insertion",
            VariantEffect::InframeDeletion => "inframe_deletion",
            VariantEffect::Missense => "missense_variant",
            VariantEffect::PhasedMissense => "phased_missense",
            VariantEffect::PhasedInframeInsertion => "phased_inframe_insertion",
            VariantEffect::PhasedInframeDeletion => "phased_inframe_deletion",
            VariantEffect::Synonymous => "synonymous_variant",
            VariantEffect::PhasedSynonymous => "phased_synonymous",
            VariantEffect::Intronic => "intron_variant",
            VariantEffect::FivePrimeUtr => "5_prime_UTR_variant",
            VariantEffect::ThreePrimeUtr => "3_prime_UTR_variant",
            VariantEffect::UpstreamGene => "upstream_gene_variant",
            VariantEffect::NonCodingTranscript => "non_coding_transcript_exon_variant",
            VariantEffect::Other => "other",
        }
    }

    /// Whether this is one of the phase-set-dependent effect codes
    pub fn is_phased(&self) -> bool {
        matches!(
            self,
            VariantEffect::PhasedMissense
                | VariantEffect::PhasedInframeInsertion
                | VariantEffect::PhasedInframeDeletion
                | VariantEffect::PhasedSynonymous
        )
    }

    /// Map a phased effect to its ordinary equivalent; other effects are unchanged.
    pub fn normalized(self) -> Self {
        match self {
            VariantEffect::PhasedMissense => VariantEffect::Missense,
            VariantEffect::PhasedInframeInsertion => VariantEffect::InframeInsertion,
            VariantEffect::PhasedInframeDeletion => VariantEffect::InframeDeletion,
            VariantEffect::PhasedSynonymous => VariantEffect::Synonymous,
            other => other,
        }
    }
}

impl fmt::Display for VariantEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.so_term())
    }
}

/// Coarse coding consequence of a variant on a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodingEffect {
    NonsenseOrFrameshift,
    Splice,
    Missense,
    Synonymous,
    None,
}

impl CodingEffect {
    /// Whether the protein sequence is changed
    pub fn is_protein_altering(&self) -> bool {
        matches!(
            self,
            CodingEffect::NonsenseOrFrameshift | CodingEffect::Splice | CodingEffect::Missense
        )
    }
}

/// Variant class, derived purely from ref/alt lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    Snv,
    Mnv,
    Insert,
    Delete,
}

impl VariantType {
    /// Classify from the resolved reference and alternate alleles.
    ///
    /// ```
    /// use ferro_panel::model::VariantType;
    ///
    /// assert_eq!(VariantType::from_alleles("T", "A"), VariantType::Snv);
    /// assert_eq!(VariantType::from_alleles("TG", "AC"), VariantType::Mnv);
    /// assert_eq!(VariantType::from_alleles("T", "TAC"), VariantType::Insert);
    /// assert_eq!(VariantType::from_alleles("TAC", "T"), VariantType::Delete);
    /// ```
    pub fn from_alleles(ref_allele: &str, alt_allele: &str) -> Self {
        let (ref_len, alt_len) = (ref_allele.len(), alt_allele.len());
        if ref_len == alt_len {
            if ref_len == 1 {
                VariantType::Snv
            } else {
                VariantType::Mnv
            }
        } else if alt_len > ref_len {
            VariantType::Insert
        } else {
            VariantType::Delete
        }
    }
}

/// Likelihood that an alteration drives the tumor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverLikelihood {
    Low,
    Medium,
    High,
}

/// Role of a gene in cancer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneRole {
    Onco,
    Tsg,
    Both,
    #[default]
    Unknown,
}

impl GeneRole {
    pub fn is_oncogene(&self) -> bool {
        matches!(self, GeneRole::Onco | GeneRole::Both)
    }

    pub fn is_tumor_suppressor(&self) -> bool {
        matches!(self, GeneRole::Tsg | GeneRole::Both)
    }
}

/// Effect of an alteration on protein function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProteinEffect {
    #[default]
    Unknown,
    Ambiguous,
    NoEffect,
    NoEffectPredicted,
    LossOfFunction,
    LossOfFunctionPredicted,
    GainOfFunction,
    GainOfFunctionPredicted,
}

/// Outcome of a variant on one transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptVariantImpact {
    pub transcript_id: String,
    pub hgvs_coding_impact: String,
    pub hgvs_protein_impact: String,
    pub affected_codon: Option<u32>,
    pub affected_exon: Option<u32>,
    pub is_splice_region: bool,
    pub effects: BTreeSet<VariantEffect>,
    pub coding_effect: Option<CodingEffect>,
}

/// An annotated small variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub gene: String,
    pub chromosome: String,
    pub position: u64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub variant_type: VariantType,
    pub variant_allele_frequency: Option<f64>,
    pub canonical_impact: TranscriptVariantImpact,
    pub other_impacts: Vec<TranscriptVariantImpact>,
    pub event: String,
    pub is_reportable: bool,
    pub is_hotspot: bool,
    pub is_cancer_associated_variant: bool,
    pub driver_likelihood: Option<DriverLikelihood>,
    pub gene_role: GeneRole,
    pub protein_effect: ProteinEffect,
    pub is_associated_with_drug_resistance: Option<bool>,
    pub evidence: ClinicalEvidence,
}

/// Copy-number alteration class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CopyNumberType {
    FullGain,
    PartialGain,
    FullDel,
    PartialDel,
    None,
}

impl CopyNumberType {
    pub fn is_gain(&self) -> bool {
        matches!(self, CopyNumberType::FullGain | CopyNumberType::PartialGain)
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, CopyNumberType::FullDel | CopyNumberType::PartialDel)
    }
}

/// Copy-number outcome on one transcript
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TranscriptCopyNumberImpact {
    pub transcript_id: String,
    pub copy_number_type: CopyNumberType,
    pub min_copies: Option<u32>,
    pub max_copies: Option<u32>,
}

/// An annotated gene-level copy-number alteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyNumber {
    pub gene: String,
    pub event: String,
    pub canonical_impact: TranscriptCopyNumberImpact,
    pub other_impacts: Vec<TranscriptCopyNumberImpact>,
    pub is_reportable: bool,
    pub driver_likelihood: Option<DriverLikelihood>,
    pub gene_role: GeneRole,
    pub protein_effect: ProteinEffect,
    pub is_associated_with_drug_resistance: Option<bool>,
    pub evidence: ClinicalEvidence,
}

/// How a fusion was classified against the known-fusion cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FusionDriverType {
    KnownPair,
    KnownPairDelDup,
    PromiscuousBoth,
    #[serde(rename = "PROMISCUOUS_5")]
    Promiscuous5,
    #[serde(rename = "PROMISCUOUS_3")]
    Promiscuous3,
    None,
}

impl FusionDriverType {
    /// Whether the partners form a curated pair (including del/dup self-fusions)
    pub fn is_known_pair(&self) -> bool {
        matches!(
            self,
            FusionDriverType::KnownPair | FusionDriverType::KnownPairDelDup
        )
    }
}

/// An annotated fusion (exon skips are modelled as self-fusions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fusion {
    pub gene_start: String,
    pub gene_end: String,
    pub gene_transcript_start: Option<String>,
    pub gene_transcript_end: Option<String>,
    pub fused_exon_up: Option<u32>,
    pub fused_exon_down: Option<u32>,
    pub driver_type: FusionDriverType,
    pub event: String,
    pub is_reportable: bool,
    pub driver_likelihood: Option<DriverLikelihood>,
    pub protein_effect: ProteinEffect,
    pub is_associated_with_drug_resistance: Option<bool>,
    pub evidence: ClinicalEvidence,
}

/// Virus families reported by panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VirusType {
    HumanPapillomaVirus,
    EpsteinBarrVirus,
    HepatitisBVirus,
    MerkelCellVirus,
    #[serde(rename = "HUMAN_HERPES_VIRUS_8")]
    HumanHerpesVirus8,
    Other,
}

impl VirusType {
    /// Short display name (e.g., "HPV")
    pub fn display(&self) -> &'static str {
        match self {
            VirusType::HumanPapillomaVirus => "HPV",
            VirusType::EpsteinBarrVirus => "EBV",
            VirusType::HepatitisBVirus => "HBV",
            VirusType::MerkelCellVirus => "MCV",
            VirusType::HumanHerpesVirus8 => "HHV-8",
            VirusType::Other => "Other virus",
        }
    }
}

impl fmt::Display for VirusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// An annotated viral presence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Virus {
    pub name: String,
    pub virus_type: VirusType,
    pub is_reliable: bool,
    pub integrations: Option<u32>,
    pub event: String,
    pub is_reportable: bool,
    pub driver_likelihood: Option<DriverLikelihood>,
    pub evidence: ClinicalEvidence,
}
