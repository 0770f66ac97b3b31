//! The annotated, write-once record of one panel run.

use serde::{Deserialize, Serialize};

use super::characteristics::{MolecularCharacteristics, MolecularImmunology};
use super::driver::{CopyNumber, Fusion, Variant, Virus};
use super::target::PanelTargetSpecification;

/// All drivers found in one panel run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drivers {
    pub variants: Vec<Variant>,
    pub copy_numbers: Vec<CopyNumber>,
    pub fusions: Vec<Fusion>,
    pub viruses: Vec<Virus>,
}

impl Drivers {
    /// Total number of drivers of all kinds
    pub fn len(&self) -> usize {
        self.variants.len() + self.copy_numbers.len() + self.fusions.len() + self.viruses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The annotated record of one panel run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPanelTest {
    pub test_name: String,
    pub drivers: Drivers,
    pub characteristics: MolecularCharacteristics,
    pub immunology: Option<MolecularImmunology>,
    pub target_specification: PanelTargetSpecification,
}
