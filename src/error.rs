//! Error types for ferro-panel
//!
//! Every error carries an [`ErrorCode`] for programmatic handling. Errors are
//! grouped by the stage that raises them:
//! - E1xxx: reference data (Ensembl cache, fusion cache, decomposition table)
//! - E2xxx: annotation (collaborator responses, codon/exon lookups)
//! - E3xxx: phase-set consistency
//! - E9xxx: IO, serialization and configuration

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Reference errors (E1xxx)
    /// Gene not present in the Ensembl data cache
    UnknownGene = 1001,
    /// Gene has no canonical transcript
    NoCanonicalTranscript = 1002,
    /// Malformed reference table
    MalformedReference = 1003,

    // Annotation errors (E2xxx)
    /// HGVS could not be resolved to a genomic coordinate
    UnresolvedVariant = 2001,
    /// Transcript-impact annotator omitted submitted queries
    MissingImpactResponse = 2002,
    /// No codon/exon available for a transcript position
    MissingExonCodon = 2003,
    /// Collaborator failed outright
    AnnotatorFailure = 2004,
    /// HLA allele name could not be parsed
    InvalidHlaAllele = 2005,

    // Phasing errors (E3xxx)
    /// Phase-set members disagree on the protein impact
    PhaseSetProteinMismatch = 3001,
    /// Phase-set members disagree on the canonical transcript
    PhaseSetTranscriptMismatch = 3002,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnknownGene => "gene not found in Ensembl data cache",
            ErrorCode::NoCanonicalTranscript => "gene has no canonical transcript",
            ErrorCode::MalformedReference => "malformed reference table",
            ErrorCode::UnresolvedVariant => "variant could not be resolved",
            ErrorCode::MissingImpactResponse => "transcript impact response missing",
            ErrorCode::MissingExonCodon => "codon/exon lookup missing",
            ErrorCode::AnnotatorFailure => "annotator failure",
            ErrorCode::InvalidHlaAllele => "invalid HLA allele",
            ErrorCode::PhaseSetProteinMismatch => "phase set protein impacts disagree",
            ErrorCode::PhaseSetTranscriptMismatch => "phase set canonical transcripts disagree",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-panel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// Gene not present in the Ensembl data cache
    #[error("Gene not found in Ensembl data cache: {gene}")]
    UnknownGene { gene: String },

    /// Gene is known but has no canonical transcript
    #[error("No canonical transcript for gene {gene} ({gene_id})")]
    NoCanonicalTranscript { gene: String, gene_id: String },

    /// Reference table line could not be parsed
    #[error("Malformed reference table {source_name} at line {line}: {msg}")]
    MalformedReference {
        source_name: String,
        line: usize,
        msg: String,
    },

    /// HGVS could not be resolved to a genomic coordinate
    #[error("Could not resolve {hgvs} on {gene}: {msg}")]
    UnresolvedVariant {
        gene: String,
        hgvs: String,
        msg: String,
    },

    /// The transcript-impact annotator did not answer every submitted query
    #[error("Transcript impact response missing for query ids: {query_ids:?}")]
    MissingImpactResponse { query_ids: Vec<usize> },

    /// No codon/exon available for a transcript position
    #[error("No codon/exon found for {gene} {transcript} at position {position}")]
    MissingExonCodon {
        gene: String,
        transcript: String,
        position: u64,
    },

    /// A collaborator failed outright
    #[error("Annotator failure: {msg}")]
    AnnotatorFailure { msg: String },

    /// HLA allele name could not be parsed
    #[error("Invalid HLA allele: {name}")]
    InvalidHlaAllele { name: String },

    /// Phase-set members disagree on the protein impact
    #[error("Phase set {phase_set_id} has inconsistent protein impacts: {impacts:?}")]
    PhaseSetProteinMismatch {
        phase_set_id: usize,
        impacts: Vec<String>,
    },

    /// Phase-set members disagree on the canonical transcript
    #[error("Phase set {phase_set_id} has inconsistent canonical transcripts: {transcripts:?}")]
    PhaseSetTranscriptMismatch {
        phase_set_id: usize,
        transcripts: Vec<String>,
    },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// Configuration error
    #[error("Configuration error: {msg}")]
    Config { msg: String },
}

impl PanelError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            PanelError::UnknownGene { .. } => ErrorCode::UnknownGene,
            PanelError::NoCanonicalTranscript { .. } => ErrorCode::NoCanonicalTranscript,
            PanelError::MalformedReference { .. } => ErrorCode::MalformedReference,
            PanelError::UnresolvedVariant { .. } => ErrorCode::UnresolvedVariant,
            PanelError::MissingImpactResponse { .. } => ErrorCode::MissingImpactResponse,
            PanelError::MissingExonCodon { .. } => ErrorCode::MissingExonCodon,
            PanelError::AnnotatorFailure { .. } => ErrorCode::AnnotatorFailure,
            PanelError::InvalidHlaAllele { .. } => ErrorCode::InvalidHlaAllele,
            PanelError::PhaseSetProteinMismatch { .. } => ErrorCode::PhaseSetProteinMismatch,
            PanelError::PhaseSetTranscriptMismatch { .. } => {
                ErrorCode::PhaseSetTranscriptMismatch
            }
            PanelError::Io { .. } => ErrorCode::IoError,
            PanelError::Json { .. } => ErrorCode::JsonError,
            PanelError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Format the error with its code prefix, e.g. "[E1001] Gene not found ..."
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }

    pub(crate) fn malformed(source_name: impl Into<String>, line: usize, msg: impl Into<String>) -> Self {
        PanelError::MalformedReference {
            source_name: source_name.into(),
            line,
            msg: msg.into(),
        }
    }
}

impl From<std::io::Error> for PanelError {
    fn from(err: std::io::Error) -> Self {
        PanelError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        PanelError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PanelError {
    fn from(err: toml::de::Error) -> Self {
        PanelError::Config {
            msg: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PanelError {
    fn from(err: toml::ser::Error) -> Self {
        PanelError::Config {
            msg: err.to_string(),
        }
    }
}
