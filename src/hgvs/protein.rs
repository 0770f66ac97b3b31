//! Protein HGVS notation helpers.
//!
//! Transcript-impact annotators report protein changes in three-letter
//! notation (`p.Val600Glu`); panel records use single-letter notation
//! (`p.V600E`).
//!
//! # Example
//!
//! ```
//! use ferro_panel::hgvs::protein::{to_single_letter, protein_event};
//!
//! assert_eq!(to_single_letter("p.Val600Glu"), "p.V600E");
//! assert_eq!(to_single_letter("p.Arg213Ter"), "p.R213*");
//! assert_eq!(protein_event("p.(V600E)"), Some("V600E"));
//! ```

use super::amino_acid::one_letter_code;

/// Rewrite every three-letter amino acid code in `hgvs` to its single-letter
/// form. Lowercase tokens (`fs`, `del`, `ins`, `dup`, `ext`) and already
/// single-letter input are left unchanged.
pub fn to_single_letter(hgvs: &str) -> String {
    let mut out = String::with_capacity(hgvs.len());
    let mut rest = hgvs;
    while let Some(ch) = rest.chars().next() {
        if let Some(code) = rest.get(..3).and_then(one_letter_code) {
            out.push(code);
            rest = &rest[3..];
        } else {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

/// Whether a protein impact carries information usable for an event name
pub fn is_informative(hgvs_protein: &str) -> bool {
    let trimmed = hgvs_protein.trim();
    !(trimmed.is_empty() || trimmed == "p.?" || trimmed == "p.(?)")
}

/// The protein change without its `p.` prefix and prediction parentheses,
/// e.g. `p.(V600E)` gives `V600E`. Returns `None` for uninformative impacts.
pub fn protein_event(hgvs_protein: &str) -> Option<&str> {
    if !is_informative(hgvs_protein) {
        return None;
    }
    let trimmed = hgvs_protein.trim();
    let bare = trimmed.strip_prefix("p.").unwrap_or(trimmed);
    let bare = bare
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .unwrap_or(bare);
    Some(bare)
}
