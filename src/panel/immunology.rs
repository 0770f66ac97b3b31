//! Annotation of HLA typing calls.

use std::collections::BTreeSet;

use crate::error::PanelError;
use crate::model::{HlaAllele, MolecularImmunology, SequencedHlaAllele};

/// Validates HLA calls and builds the immunology section of a test.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelImmunologyAnnotator;

impl PanelImmunologyAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// `None` when the panel reported no HLA calls
    pub fn annotate(
        &self,
        alleles: &[SequencedHlaAllele],
    ) -> Result<Option<MolecularImmunology>, PanelError> {
        if alleles.is_empty() {
            return Ok(None);
        }
        let hla_alleles = alleles
            .iter()
            .map(|call| {
                let (gene, name) = parse_hla_name(&call.name)?;
                Ok(HlaAllele {
                    name,
                    gene,
                    tumor_copy_number: call.tumor_copy_number,
                    has_somatic_mutations: call.has_somatic_mutations,
                })
            })
            .collect::<Result<BTreeSet<_>, PanelError>>()?;
        Ok(Some(MolecularImmunology {
            is_reliable: true,
            hla_alleles,
        }))
    }
}

/// Split an allele name such as `HLA-A*02:01` into gene (`A`) and name
/// without prefix (`A*02:01`).
pub fn parse_hla_name(raw: &str) -> Result<(String, String), PanelError> {
    let invalid = || PanelError::InvalidHlaAllele {
        name: raw.to_string(),
    };
    let trimmed = raw.trim();
    let name = trimmed.strip_prefix("HLA-").unwrap_or(trimmed);
    let (gene, fields) = name.split_once('*').ok_or_else(invalid)?;

    let gene_ok = !gene.is_empty() && gene.chars().all(|c| c.is_ascii_alphanumeric());
    let fields_ok = !fields.is_empty()
        && fields
            .split(':')
            .all(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()));
    if !gene_ok || !fields_ok {
        return Err(invalid());
    }
    Ok((gene.to_string(), name.to_string()))
}
