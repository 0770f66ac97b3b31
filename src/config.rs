//! Configuration for ferro-panel.
//!
//! Configuration is read from a TOML file. Every section has defaults, so an
//! empty file is a valid configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! [reference]
//! decomposition_path = "ref/variant_decompositions.tsv"
//! ensembl_path = "ref/ensembl_transcripts.tsv.gz"
//! known_fusion_path = "ref/known_fusions.tsv"
//! knowledge_base_path = "ref/gene_knowledge.json"
//! evidence_path = "ref/evidence.json"
//!
//! [annotation]
//! tmb_high_threshold = 10.0
//!
//! [annotators]
//! resolutions_path = "annotations/resolutions.json"
//! impacts_path = "annotations/impacts.json"
//! exon_codons_path = "annotations/exon_codons.json"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::PanelError;

/// TMB above this value (mutations per megabase) is called high
pub const DEFAULT_TMB_HIGH_THRESHOLD: f64 = 10.0;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PanelConfig {
    /// Reference tables
    #[serde(default)]
    pub reference: ReferenceConfig,
    /// Annotation thresholds
    #[serde(default)]
    pub annotation: AnnotationConfig,
    /// File-backed collaborator responses
    #[serde(default)]
    pub annotators: AnnotatorConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paths of the reference tables loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReferenceConfig {
    /// Variant decomposition TSV (optionally gzipped)
    pub decomposition_path: Option<PathBuf>,
    /// Ensembl gene/transcript TSV (optionally gzipped)
    pub ensembl_path: Option<PathBuf>,
    /// Known fusion TSV (optionally gzipped)
    pub known_fusion_path: Option<PathBuf>,
    /// Curated gene knowledge base JSON
    pub knowledge_base_path: Option<PathBuf>,
    /// Clinical evidence JSON
    pub evidence_path: Option<PathBuf>,
}

/// Annotation thresholds
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnnotationConfig {
    /// TMB strictly above this value is high (default: 10.0)
    #[serde(default = "default_tmb_high_threshold")]
    pub tmb_high_threshold: f64,
}

fn default_tmb_high_threshold() -> f64 {
    DEFAULT_TMB_HIGH_THRESHOLD
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            tmb_high_threshold: DEFAULT_TMB_HIGH_THRESHOLD,
        }
    }
}

/// Precomputed collaborator responses for the command line tool
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnnotatorConfig {
    /// HGVS resolutions JSON
    pub resolutions_path: Option<PathBuf>,
    /// Transcript impacts JSON
    pub impacts_path: Option<PathBuf>,
    /// Exon/codon lookups JSON
    pub exon_codons_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log filter directive (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PanelConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, PanelError> {
        let config: PanelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), PanelError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), PanelError> {
        let threshold = self.annotation.tmb_high_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(PanelError::Config {
                msg: format!("tmb_high_threshold must be a non-negative number, got {}", threshold),
            });
        }
        Ok(())
    }

    /// A sample configuration with every path filled in
    pub fn sample() -> Self {
        Self {
            reference: ReferenceConfig {
                decomposition_path: Some(PathBuf::from("ref/variant_decompositions.tsv")),
                ensembl_path: Some(PathBuf::from("ref/ensembl_transcripts.tsv.gz")),
                known_fusion_path: Some(PathBuf::from("ref/known_fusions.tsv")),
                knowledge_base_path: Some(PathBuf::from("ref/gene_knowledge.json")),
                evidence_path: Some(PathBuf::from("ref/evidence.json")),
            },
            annotation: AnnotationConfig::default(),
            annotators: AnnotatorConfig {
                resolutions_path: Some(PathBuf::from("annotations/resolutions.json")),
                impacts_path: Some(PathBuf::from("annotations/impacts.json")),
                exon_codons_path: Some(PathBuf::from("annotations/exon_codons.json")),
            },
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = PanelConfig::parse("").unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.annotation.tmb_high_threshold, 10.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[reference]
decomposition_path = "ref/decomp.tsv"
ensembl_path = "ref/ensembl.tsv.gz"

[annotation]
tmb_high_threshold = 16.0

[logging]
level = "debug"
"#;
        let config = PanelConfig::parse(content).unwrap();
        assert_eq!(
            config.reference.decomposition_path,
            Some(PathBuf::from("ref/decomp.tsv"))
        );
        assert_eq!(config.reference.known_fusion_path, None);
        assert_eq!(config.annotation.tmb_high_threshold, 16.0);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let content = "[annotation]\ntmb_high_threshold = -1.0\n";
        let err = PanelConfig::parse(content).unwrap_err();
        assert!(matches!(err, PanelError::Config { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = PanelConfig::parse("[annotation\n").unwrap_err();
        assert!(matches!(err, PanelError::Config { .. }));
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.toml");
        let config = PanelConfig::sample();
        config.to_file(&path).unwrap();
        let loaded = PanelConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
