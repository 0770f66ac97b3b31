// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-panel: sequencing panel interpretation
//!
//! Part of the ferro bioinformatics toolkit. Converts the raw calls of a
//! targeted sequencing panel (variants, copy numbers, fusions, exon skips,
//! viruses, HLA typing) into a canonical annotated record.
//!
//! # Example
//!
//! ```
//! use ferro_panel::annotation::{
//!     ExonCodon, FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
//!     GenomicCoordinate, TranscriptImpactEntry, TranscriptImpactResponse,
//! };
//! use ferro_panel::model::{PanelTargetSpecification, PanelTestResult, SequencedVariant};
//! use ferro_panel::{PanelAnnotator, ReferenceData};
//!
//! let coordinate = GenomicCoordinate::new("7", 140453136, "A", "T");
//! let mut resolver = FileVariantResolver::new();
//! resolver.add_resolution("BRAF", "c.1799T>A", coordinate.clone());
//!
//! let mut impacts = FileTranscriptImpactAnnotator::new();
//! impacts.add_impact(
//!     coordinate,
//!     TranscriptImpactResponse {
//!         canonical: TranscriptImpactEntry {
//!             gene: "BRAF".to_string(),
//!             transcript_id: "ENST00000288602".to_string(),
//!             hgvs_coding_impact: "c.1799T>A".to_string(),
//!             hgvs_protein_impact: "p.Val600Glu".to_string(),
//!             is_splice_region: false,
//!             effects: Default::default(),
//!             coding_effect: None,
//!         },
//!         others: vec![],
//!     },
//! );
//!
//! let mut exon_codons = FileExonCodonLookup::new();
//! exon_codons.add("BRAF", "ENST00000288602", 140453136, ExonCodon::new(Some(15), Some(600)));
//!
//! let reference = ReferenceData::default();
//! let annotator = PanelAnnotator::new(&reference, &resolver, &impacts, &exon_codons);
//!
//! let mut result = PanelTestResult::new("panel-1");
//! result.variants.push(SequencedVariant::coding("BRAF", "c.1799T>A"));
//! let record = annotator.annotate(&result, &PanelTargetSpecification::new()).unwrap();
//! assert_eq!(record.drivers.variants[0].canonical_impact.hgvs_protein_impact, "p.V600E");
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod hgvs;
pub mod model;
pub mod panel;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod reference;

pub use config::PanelConfig;
pub use error::{ErrorCode, PanelError};
pub use panel::PanelAnnotator;
pub use reference::ReferenceData;

/// Result type for ferro-panel operations
pub type Result<T> = std::result::Result<T, PanelError>;
