//! Annotation of viral presence calls.

use crate::model::{ClinicalEvidence, DriverLikelihood, SequencedVirus, Virus};

/// Turns viral presence calls into [`Virus`] drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelVirusAnnotator;

impl PanelVirusAnnotator {
    pub fn new() -> Self {
        Self
    }

    pub fn annotate(&self, viruses: &[SequencedVirus]) -> Vec<Virus> {
        viruses.iter().map(annotate_virus).collect()
    }
}

fn annotate_virus(call: &SequencedVirus) -> Virus {
    let driver_likelihood = if call.is_low_risk {
        DriverLikelihood::Low
    } else {
        DriverLikelihood::High
    };
    Virus {
        name: call
            .integrated_virus
            .clone()
            .unwrap_or_else(|| call.virus_type.display().to_string()),
        virus_type: call.virus_type,
        is_reliable: true,
        integrations: None,
        event: format!("{} positive", call.virus_type),
        is_reportable: true,
        driver_likelihood: Some(driver_likelihood),
        evidence: ClinicalEvidence::default(),
    }
}
