//! Declaration of what a panel is able to detect.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Alteration classes a panel can target per gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MolecularTestTarget {
    Mutation,
    Amplification,
    Deletion,
    Fusion,
}

/// Per-gene targets of a panel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelTargetSpecification {
    targets: BTreeMap<String, BTreeSet<MolecularTestTarget>>,
}

impl PanelTargetSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the targets of a gene, merging with any already declared
    pub fn with_gene(
        mut self,
        gene: impl Into<String>,
        targets: impl IntoIterator<Item = MolecularTestTarget>,
    ) -> Self {
        self.targets.entry(gene.into()).or_default().extend(targets);
        self
    }

    /// Whether `gene` is tested for `target`
    pub fn tests_gene(&self, gene: &str, target: MolecularTestTarget) -> bool {
        self.targets
            .get(gene)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// All genes with at least one target, in sorted order
    pub fn tested_genes(&self) -> impl Iterator<Item = &str> {
        self.targets
            .iter()
            .filter(|(_, targets)| !targets.is_empty())
            .map(|(gene, _)| gene.as_str())
    }

    pub fn targets_for(&self, gene: &str) -> Option<&BTreeSet<MolecularTestTarget>> {
        self.targets.get(gene)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
