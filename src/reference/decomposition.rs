//! Variant decomposition reference.
//!
//! Some panels report a multi-nucleotide event as one coding HGVS that
//! annotators cannot resolve directly. The decomposition table maps such an
//! HGVS to the simpler fragments that together make up the event.
//!
//! # Format
//!
//! Tab-separated, one reported HGVS per row, fragments comma-separated. A
//! header row starting with `hgvs` and `#` comment lines are skipped:
//!
//! ```text
//! hgvs	decomposition
//! c.1798_1799delinsAA	c.1798G>A,c.1799T>A
//! ```

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use super::{data_fields, open_table};
use crate::error::PanelError;

/// One reported HGVS and its fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDecomposition {
    pub hgvs: String,
    pub fragments: Vec<String>,
}

/// Read-only lookup from reported HGVS to decomposed fragments
#[derive(Debug, Clone, Default)]
pub struct VariantDecompositionIndex {
    entries: HashMap<String, VariantDecomposition>,
}

impl VariantDecompositionIndex {
    pub fn new(decompositions: impl IntoIterator<Item = VariantDecomposition>) -> Self {
        Self {
            entries: decompositions
                .into_iter()
                .map(|d| (d.hgvs.clone(), d))
                .collect(),
        }
    }

    /// Load from a (possibly gzipped) TSV file
    pub fn from_path(path: &Path) -> Result<Self, PanelError> {
        Self::from_reader(open_table(path)?, &path.display().to_string())
    }

    /// Parse from a reader; `source_name` is used in error messages
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self, PanelError> {
        let mut entries = HashMap::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let Some(fields) = data_fields(&line) else {
                continue;
            };
            if fields[0].eq_ignore_ascii_case("hgvs") {
                continue;
            }
            if fields.len() < 2 {
                return Err(PanelError::malformed(
                    source_name,
                    line_no,
                    "expected HGVS and decomposition columns",
                ));
            }
            let fragments: Vec<String> = fields[1]
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect();
            if fragments.is_empty() {
                return Err(PanelError::malformed(
                    source_name,
                    line_no,
                    format!("empty decomposition for {}", fields[0]),
                ));
            }
            let hgvs = fields[0].to_string();
            if entries.contains_key(&hgvs) {
                return Err(PanelError::malformed(
                    source_name,
                    line_no,
                    format!("duplicate decomposition for {}", hgvs),
                ));
            }
            entries.insert(hgvs.clone(), VariantDecomposition { hgvs, fragments });
        }
        Ok(Self { entries })
    }

    /// Fragments of `hgvs`, if it has a decomposition
    pub fn lookup(&self, hgvs: &str) -> Option<&[String]> {
        self.entries.get(hgvs).map(|d| d.fragments.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_table() {
        let tsv = "hgvs\tdecomposition\n# comment\nc.1798_1799delinsAA\tc.1798G>A, c.1799T>A\n";
        let index = VariantDecompositionIndex::from_reader(Cursor::new(tsv), "test").unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.lookup("c.1798_1799delinsAA"),
            Some(&["c.1798G>A".to_string(), "c.1799T>A".to_string()][..])
        );
        assert_eq!(index.lookup("c.1799T>A"), None);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let err = VariantDecompositionIndex::from_reader(Cursor::new("c.1A>G\n"), "test")
            .unwrap_err();
        assert!(matches!(
            err,
            PanelError::MalformedReference { line: 1, .. }
        ));
    }

    #[test]
    fn test_duplicate_is_malformed() {
        let tsv = "c.1_2delinsAA\tc.1A>G\nc.1_2delinsAA\tc.2A>G\n";
        let err = VariantDecompositionIndex::from_reader(Cursor::new(tsv), "test").unwrap_err();
        assert!(matches!(
            err,
            PanelError::MalformedReference { line: 2, .. }
        ));
    }
}
