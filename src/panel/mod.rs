//! Panel interpretation pipeline.
//!
//! Converts the raw calls of one panel run into an [`AnnotatedPanelTest`]:
//!
//! - [`PanelVariantAnnotator`]: expand, resolve, annotate, collapse and
//!   finalize small variants
//! - [`PanelCopyNumberAnnotator`]: amplifications and deletions
//! - [`PanelFusionAnnotator`]: fusions and exon skips
//! - [`PanelVirusAnnotator`] and [`PanelImmunologyAnnotator`]
//! - [`PanelDriverAttributeAnnotator`] and [`PanelEvidenceAnnotator`]:
//!   curated enrichment
//! - [`PanelAnnotator`]: orchestrates all of the above
//!
//! [`AnnotatedPanelTest`]: crate::model::AnnotatedPanelTest

pub mod annotator;
pub mod collapse;
pub mod copy_number;
pub mod driver_attributes;
pub mod evidence;
pub mod exon_codon;
pub mod expand;
pub mod fusion;
pub mod immunology;
pub mod likelihood;
pub mod stage;
pub mod variant;
pub mod virus;

#[cfg(test)]
pub(crate) mod test_support;

pub use annotator::PanelAnnotator;
pub use collapse::PhasedDecompositionCollapser;
pub use copy_number::PanelCopyNumberAnnotator;
pub use driver_attributes::PanelDriverAttributeAnnotator;
pub use evidence::PanelEvidenceAnnotator;
pub use exon_codon::PhaseSetExonCodonResolver;
pub use expand::VariantDecompositionExpander;
pub use fusion::PanelFusionAnnotator;
pub use immunology::PanelImmunologyAnnotator;
pub use likelihood::GeneDriverLikelihoodModel;
pub use stage::{AnnotatableVariant, CollapsedVariant, CoordinateResolved, ImpactAnnotated};
pub use variant::PanelVariantAnnotator;
pub use virus::PanelVirusAnnotator;
