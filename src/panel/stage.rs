//! Working records of the variant pipeline.
//!
//! A variant query moves through a fixed sequence of immutable values:
//!
//! ```text
//! AnnotatableVariant -> CoordinateResolved -> ImpactAnnotated -> CollapsedVariant -> Variant
//! ```
//!
//! Each transition consumes the previous value, so a stage can only be built
//! from a record that passed every earlier stage.

use crate::annotation::{ExonCodon, GenomicCoordinate, TranscriptImpactResponse};
use crate::model::SequencedVariant;

/// One annotation query derived from a raw variant call
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatableVariant {
    /// Unique, sequential within one test
    pub query_id: usize,
    /// The raw call this query was derived from
    pub source: SequencedVariant,
    /// HGVS sent to the variant resolver (a fragment for phased queries)
    pub query_hgvs: String,
    /// Shared by every fragment of one decomposed call
    pub phase_set: Option<usize>,
}

impl AnnotatableVariant {
    /// Attach the resolved genomic coordinate
    pub fn resolved(self, coordinate: GenomicCoordinate) -> CoordinateResolved {
        CoordinateResolved {
            variant: self,
            coordinate,
        }
    }
}

/// A query with its genomic coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateResolved {
    pub variant: AnnotatableVariant,
    pub coordinate: GenomicCoordinate,
}

impl CoordinateResolved {
    /// Attach the transcript impacts reported for this query
    pub fn annotated(self, impact: TranscriptImpactResponse) -> ImpactAnnotated {
        ImpactAnnotated {
            variant: self.variant,
            coordinate: self.coordinate,
            impact,
        }
    }
}

/// A query with coordinate and transcript impacts
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactAnnotated {
    pub variant: AnnotatableVariant,
    pub coordinate: GenomicCoordinate,
    pub impact: TranscriptImpactResponse,
}

impl ImpactAnnotated {
    pub fn query_id(&self) -> usize {
        self.variant.query_id
    }

    pub fn phase_set(&self) -> Option<usize> {
        self.variant.phase_set
    }

    /// Protein impact reported on the canonical transcript
    pub fn canonical_protein_impact(&self) -> &str {
        &self.impact.canonical.hgvs_protein_impact
    }

    /// An unphased query is already its own collapsed record
    pub fn into_collapsed(self) -> CollapsedVariant {
        CollapsedVariant {
            source: self.variant.source,
            coordinate: self.coordinate,
            impact: self.impact,
            canonical_exon_codon: None,
        }
    }
}

/// One variant per raw call, ready to be finalized
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedVariant {
    pub source: SequencedVariant,
    pub coordinate: GenomicCoordinate,
    pub impact: TranscriptImpactResponse,
    /// Phase-set consensus for the canonical transcript; replaces the lookup
    pub canonical_exon_codon: Option<ExonCodon>,
}
