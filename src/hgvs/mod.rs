//! HGVS notation helpers

pub mod amino_acid;
pub mod protein;

pub use amino_acid::one_letter_code;
pub use protein::{protein_event, to_single_letter};
