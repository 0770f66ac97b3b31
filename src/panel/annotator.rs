//! Top-level annotation of one panel run.

use log::{debug, info, warn};

use crate::annotation::{ExonCodonLookup, TranscriptImpactAnnotator, VariantResolver};
use crate::config::DEFAULT_TMB_HIGH_THRESHOLD;
use crate::error::PanelError;
use crate::model::{
    AnnotatedPanelTest, ClinicalEvidence, Drivers, HomologousRecombination,
    MicrosatelliteStability, MolecularCharacteristics, MolecularTestTarget, PanelTargetSpecification,
    PanelTestResult, TumorMutationalBurden,
};
use crate::reference::ReferenceData;

use super::copy_number::PanelCopyNumberAnnotator;
use super::driver_attributes::PanelDriverAttributeAnnotator;
use super::evidence::PanelEvidenceAnnotator;
use super::fusion::PanelFusionAnnotator;
use super::immunology::PanelImmunologyAnnotator;
use super::variant::PanelVariantAnnotator;
use super::virus::PanelVirusAnnotator;

/// Annotates panel runs into [`AnnotatedPanelTest`] records.
///
/// Annotation of one test is all-or-nothing: any fatal error aborts the whole
/// test and no partial record is produced.
///
/// # Example
///
/// ```
/// use ferro_panel::annotation::{
///     FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
/// };
/// use ferro_panel::model::{PanelTargetSpecification, PanelTestResult};
/// use ferro_panel::panel::PanelAnnotator;
/// use ferro_panel::reference::ReferenceData;
///
/// let reference = ReferenceData::default();
/// let resolver = FileVariantResolver::new();
/// let impacts = FileTranscriptImpactAnnotator::new();
/// let exon_codons = FileExonCodonLookup::new();
/// let annotator = PanelAnnotator::new(&reference, &resolver, &impacts, &exon_codons);
///
/// let mut result = PanelTestResult::new("panel-1");
/// result.tumor_mutational_burden = Some(12.5);
/// let record = annotator
///     .annotate(&result, &PanelTargetSpecification::new())
///     .unwrap();
/// assert!(record.characteristics.tumor_mutational_burden.unwrap().is_high);
/// ```
pub struct PanelAnnotator<'a> {
    reference: &'a ReferenceData,
    resolver: &'a dyn VariantResolver,
    impacts: &'a dyn TranscriptImpactAnnotator,
    exon_codons: &'a dyn ExonCodonLookup,
    tmb_high_threshold: f64,
}

impl<'a> PanelAnnotator<'a> {
    pub fn new(
        reference: &'a ReferenceData,
        resolver: &'a dyn VariantResolver,
        impacts: &'a dyn TranscriptImpactAnnotator,
        exon_codons: &'a dyn ExonCodonLookup,
    ) -> Self {
        Self {
            reference,
            resolver,
            impacts,
            exon_codons,
            tmb_high_threshold: DEFAULT_TMB_HIGH_THRESHOLD,
        }
    }

    /// TMB strictly above `threshold` is called high
    pub fn with_tmb_high_threshold(mut self, threshold: f64) -> Self {
        self.tmb_high_threshold = threshold;
        self
    }

    pub fn annotate(
        &self,
        result: &PanelTestResult,
        target_specification: &PanelTargetSpecification,
    ) -> Result<AnnotatedPanelTest, PanelError> {
        let reference = self.reference;

        let variants = PanelVariantAnnotator::new(
            &reference.decompositions,
            self.resolver,
            self.impacts,
            self.exon_codons,
        )
        .annotate(&result.variants)?;
        let copy_numbers = PanelCopyNumberAnnotator::new(&reference.ensembl)
            .annotate(&result.amplifications, &result.deletions)?;
        let fusions = PanelFusionAnnotator::new(&reference.known_fusions, &reference.ensembl)
            .annotate(&result.fusions, &result.skipped_exons)?;
        let viruses = PanelVirusAnnotator::new().annotate(&result.viruses);
        let immunology = PanelImmunologyAnnotator::new().annotate(&result.hla_alleles)?;

        let drivers = Drivers {
            variants,
            copy_numbers,
            fusions,
            viruses,
        };
        check_targets(&result.test_name, &drivers, target_specification);

        let record = AnnotatedPanelTest {
            test_name: result.test_name.clone(),
            drivers: PanelDriverAttributeAnnotator::new(&reference.knowledge_base).annotate(drivers),
            characteristics: self.characteristics(result),
            immunology,
            target_specification: target_specification.clone(),
        };
        let record = PanelEvidenceAnnotator::new(&reference.evidence).annotate(record);
        info!(
            "Annotated test {}: {} drivers",
            record.test_name,
            record.drivers.len()
        );
        Ok(record)
    }

    /// Annotate independent tests in parallel; each succeeds or fails on its
    /// own and results keep input order.
    #[cfg(feature = "parallel")]
    pub fn annotate_all(
        &self,
        results: &[PanelTestResult],
        target_specification: &PanelTargetSpecification,
    ) -> Vec<Result<AnnotatedPanelTest, PanelError>> {
        crate::parallel::annotate_parallel(self, results, target_specification)
    }

    /// Annotate independent tests; each succeeds or fails on its own and
    /// results keep input order.
    #[cfg(not(feature = "parallel"))]
    pub fn annotate_all(
        &self,
        results: &[PanelTestResult],
        target_specification: &PanelTargetSpecification,
    ) -> Vec<Result<AnnotatedPanelTest, PanelError>> {
        results
            .iter()
            .map(|result| self.annotate(result, target_specification))
            .collect()
    }

    fn characteristics(&self, result: &PanelTestResult) -> MolecularCharacteristics {
        MolecularCharacteristics {
            microsatellite_stability: result.is_microsatellite_unstable.map(|is_unstable| {
                MicrosatelliteStability {
                    is_unstable,
                    evidence: ClinicalEvidence::default(),
                }
            }),
            homologous_recombination: result.is_homologous_recombination_deficient.map(
                |is_deficient| HomologousRecombination {
                    is_deficient,
                    evidence: ClinicalEvidence::default(),
                },
            ),
            tumor_mutational_burden: result.tumor_mutational_burden.map(|score| {
                TumorMutationalBurden {
                    score,
                    is_high: score > self.tmb_high_threshold,
                    evidence: ClinicalEvidence::default(),
                }
            }),
        }
    }
}

/// Warn about drivers in genes or alteration types the panel does not target
fn check_targets(test_name: &str, drivers: &Drivers, spec: &PanelTargetSpecification) {
    if spec.is_empty() {
        debug!("No target specification for test {}", test_name);
        return;
    }
    let mut untargeted: Vec<(&str, &str)> = Vec::new();
    for variant in &drivers.variants {
        if !spec.tests_gene(&variant.gene, MolecularTestTarget::Mutation) {
            untargeted.push((variant.gene.as_str(), variant.event.as_str()));
        }
    }
    for copy_number in &drivers.copy_numbers {
        let is_gain = copy_number.canonical_impact.copy_number_type.is_gain()
            || copy_number
                .other_impacts
                .iter()
                .any(|impact| impact.copy_number_type.is_gain());
        let target = if is_gain {
            MolecularTestTarget::Amplification
        } else {
            MolecularTestTarget::Deletion
        };
        if !spec.tests_gene(&copy_number.gene, target) {
            untargeted.push((copy_number.gene.as_str(), copy_number.event.as_str()));
        }
    }
    for fusion in &drivers.fusions {
        let targeted = spec.tests_gene(&fusion.gene_start, MolecularTestTarget::Fusion)
            || spec.tests_gene(&fusion.gene_end, MolecularTestTarget::Fusion);
        if !targeted {
            untargeted.push((fusion.gene_start.as_str(), fusion.event.as_str()));
        }
    }
    for (gene, event) in untargeted {
        warn!(
            "Test {} reports {} but does not target {} for this alteration",
            test_name, event, gene
        );
    }
}
