//! Parallel annotation of independent panel runs
//!
//! Tests share only immutable reference data, so they can be annotated on
//! rayon's thread pool. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_panel::annotation::{
//!     FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
//! };
//! use ferro_panel::model::{PanelTargetSpecification, PanelTestResult};
//! use ferro_panel::panel::PanelAnnotator;
//! use ferro_panel::parallel::annotate_parallel;
//! use ferro_panel::reference::ReferenceData;
//!
//! let reference = ReferenceData::default();
//! let resolver = FileVariantResolver::new();
//! let impacts = FileTranscriptImpactAnnotator::new();
//! let exon_codons = FileExonCodonLookup::new();
//! let annotator = PanelAnnotator::new(&reference, &resolver, &impacts, &exon_codons);
//!
//! let results = vec![PanelTestResult::new("a"), PanelTestResult::new("b")];
//! let records = annotate_parallel(&annotator, &results, &PanelTargetSpecification::new());
//! assert_eq!(records.len(), 2);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::PanelError;
use crate::model::{AnnotatedPanelTest, PanelTargetSpecification, PanelTestResult};
use crate::panel::PanelAnnotator;

/// Annotate multiple panel runs in parallel
///
/// Returns one result per input test. Order is preserved.
pub fn annotate_parallel(
    annotator: &PanelAnnotator<'_>,
    results: &[PanelTestResult],
    target_specification: &PanelTargetSpecification,
) -> Vec<Result<AnnotatedPanelTest, PanelError>> {
    results
        .par_iter()
        .map(|result| annotator.annotate(result, target_specification))
        .collect()
}

/// Annotate multiple panel runs in parallel, keeping only successes
///
/// Failed tests are logged and skipped.
pub fn annotate_parallel_ok(
    annotator: &PanelAnnotator<'_>,
    results: &[PanelTestResult],
    target_specification: &PanelTargetSpecification,
) -> Vec<AnnotatedPanelTest> {
    results
        .par_iter()
        .filter_map(|result| match annotator.annotate(result, target_specification) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping test {}: {}", result.test_name, e.detailed_message());
                None
            }
        })
        .collect()
}
