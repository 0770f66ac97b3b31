//! External annotation collaborators: HGVS resolution, transcript impact and
//! exon/codon lookup.

pub mod file;
pub mod provider;

pub use file::{FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver};
pub use provider::{
    ExonCodon, ExonCodonLookup, GenomicCoordinate, ImpactQuery, ImpactResponse,
    TranscriptImpactAnnotator, TranscriptImpactEntry, TranscriptImpactResponse, VariantResolver,
};
