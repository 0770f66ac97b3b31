//! Data model: raw panel calls in, annotated drivers and characteristics out.

pub mod characteristics;
pub mod driver;
pub mod evidence;
pub mod record;
pub mod sequencing;
pub mod target;

pub use characteristics::{
    HlaAllele, HomologousRecombination, MicrosatelliteStability, MolecularCharacteristics,
    MolecularImmunology, TumorMutationalBurden,
};
pub use driver::{
    CodingEffect, CopyNumber, CopyNumberType, DriverLikelihood, Fusion, FusionDriverType,
    GeneRole, ProteinEffect, TranscriptCopyNumberImpact, TranscriptVariantImpact, Variant,
    VariantEffect, VariantType, Virus, VirusType,
};
pub use evidence::{ClinicalEvidence, EvidenceDirection, EvidenceLevel, TreatmentEvidence};
pub use record::{AnnotatedPanelTest, Drivers};
pub use sequencing::{
    PanelTestResult, SequencedAmplification, SequencedDeletion, SequencedFusion,
    SequencedHlaAllele, SequencedSkippedExons, SequencedVariant, SequencedVirus,
};
pub use target::{MolecularTestTarget, PanelTargetSpecification};
