//! Known fusion cache.
//!
//! # Format
//!
//! Tab-separated with columns `type`, `five_gene`, `three_gene`. Supported
//! types are `KNOWN_PAIR`, `EXON_DEL_DUP`, `PROMISCUOUS_5` and
//! `PROMISCUOUS_3`; immunoglobulin entries (`IG_*`) are skipped. For
//! promiscuous entries only the relevant partner column needs a value.

use log::debug;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use super::{data_fields, open_table};
use crate::error::PanelError;

/// Kind of entry in the known fusion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownFusionType {
    KnownPair,
    ExonDelDup,
    Promiscuous5,
    Promiscuous3,
}

impl KnownFusionType {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "KNOWN_PAIR" => Some(Self::KnownPair),
            "EXON_DEL_DUP" => Some(Self::ExonDelDup),
            "PROMISCUOUS_5" => Some(Self::Promiscuous5),
            "PROMISCUOUS_3" => Some(Self::Promiscuous3),
            _ => None,
        }
    }
}

/// Curated fusion pairs and promiscuous fusion partners
#[derive(Debug, Clone, Default)]
pub struct KnownFusionCache {
    known_pairs: HashSet<(String, String)>,
    exon_del_dup_genes: HashSet<String>,
    promiscuous_five: HashSet<String>,
    promiscuous_three: HashSet<String>,
}

impl KnownFusionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a (possibly gzipped) TSV file
    pub fn from_path(path: &Path) -> Result<Self, PanelError> {
        Self::from_reader(open_table(path)?, &path.display().to_string())
    }

    /// Parse from a reader; `source_name` is used in error messages
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self, PanelError> {
        let mut cache = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let Some(fields) = data_fields(&line) else {
                continue;
            };
            if fields[0].eq_ignore_ascii_case("type") {
                continue;
            }
            if fields[0].starts_with("IG_") {
                debug!("Skipping immunoglobulin fusion entry at line {}", line_no);
                continue;
            }
            let fusion_type = KnownFusionType::parse(fields[0]).ok_or_else(|| {
                PanelError::malformed(
                    source_name,
                    line_no,
                    format!("unknown fusion type '{}'", fields[0]),
                )
            })?;
            let five = fields.get(1).copied().unwrap_or("");
            let three = fields.get(2).copied().unwrap_or("");
            let required_missing = match fusion_type {
                KnownFusionType::KnownPair => five.is_empty() || three.is_empty(),
                KnownFusionType::ExonDelDup | KnownFusionType::Promiscuous5 => five.is_empty(),
                KnownFusionType::Promiscuous3 => three.is_empty(),
            };
            if required_missing {
                return Err(PanelError::malformed(
                    source_name,
                    line_no,
                    format!("missing gene for {:?} entry", fusion_type),
                ));
            }
            cache = cache.with_entry(fusion_type, five, three);
        }
        Ok(cache)
    }

    /// Builder used to assemble small caches in code
    pub fn with_entry(mut self, fusion_type: KnownFusionType, five_gene: &str, three_gene: &str) -> Self {
        match fusion_type {
            KnownFusionType::KnownPair => {
                self.known_pairs
                    .insert((five_gene.to_string(), three_gene.to_string()));
            }
            KnownFusionType::ExonDelDup => {
                self.exon_del_dup_genes.insert(five_gene.to_string());
            }
            KnownFusionType::Promiscuous5 => {
                self.promiscuous_five.insert(five_gene.to_string());
            }
            KnownFusionType::Promiscuous3 => {
                self.promiscuous_three.insert(three_gene.to_string());
            }
        }
        self
    }

    /// Whether (`five_gene`, `three_gene`) is a curated pair, in that orientation
    pub fn has_known_fusion(&self, five_gene: &str, three_gene: &str) -> bool {
        self.known_pairs
            .contains(&(five_gene.to_string(), three_gene.to_string()))
    }

    /// Whether `gene` has a known intragenic exon deletion/duplication
    pub fn has_exon_del_dup(&self, gene: &str) -> bool {
        self.exon_del_dup_genes.contains(gene)
    }

    pub fn has_promiscuous_five_gene(&self, gene: &str) -> bool {
        self.promiscuous_five.contains(gene)
    }

    pub fn has_promiscuous_three_gene(&self, gene: &str) -> bool {
        self.promiscuous_three.contains(gene)
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.known_pairs.len()
            + self.exon_del_dup_genes.len()
            + self.promiscuous_five.len()
            + self.promiscuous_three.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_table() {
        let tsv = "type\tfive_gene\tthree_gene\n\
KNOWN_PAIR\tEML4\tALK\n\
EXON_DEL_DUP\tEGFR\tEGFR\n\
PROMISCUOUS_5\tKMT2A\t\n\
PROMISCUOUS_3\t\tALK\n\
IG_KNOWN_PAIR\tIGH\tBCL2\n";
        let cache = KnownFusionCache::from_reader(Cursor::new(tsv), "test").unwrap();
        assert_eq!(cache.len(), 4);
        assert!(cache.has_known_fusion("EML4", "ALK"));
        assert!(!cache.has_known_fusion("ALK", "EML4"));
        assert!(cache.has_exon_del_dup("EGFR"));
        assert!(cache.has_promiscuous_five_gene("KMT2A"));
        assert!(cache.has_promiscuous_three_gene("ALK"));
        assert!(!cache.has_promiscuous_five_gene("ALK"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = KnownFusionCache::from_reader(Cursor::new("WEIRD\tA\tB\n"), "test").unwrap_err();
        assert!(matches!(err, PanelError::MalformedReference { line: 1, .. }));
    }

    #[test]
    fn test_known_pair_requires_both_genes() {
        let err = KnownFusionCache::from_reader(Cursor::new("KNOWN_PAIR\tEML4\n"), "test")
            .unwrap_err();
        assert!(matches!(err, PanelError::MalformedReference { .. }));
    }
}
