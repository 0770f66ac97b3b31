// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-panel CLI
//!
//! Command-line interface for annotating sequencing panel results.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;

use ferro_panel::annotation::{
    FileExonCodonLookup, FileTranscriptImpactAnnotator, FileVariantResolver,
};
use ferro_panel::config::AnnotatorConfig;
use ferro_panel::model::{AnnotatedPanelTest, PanelTargetSpecification, PanelTestResult};
use ferro_panel::{PanelAnnotator, PanelConfig, ReferenceData};

#[derive(Parser)]
#[command(name = "ferro-panel")]
#[command(author, version, about = "Sequencing panel interpretation")]
#[command(
    long_about = "Annotate targeted sequencing panel results into canonical molecular records.

Examples:
  ferro-panel config > panel.toml
  ferro-panel annotate --config panel.toml --input tests.json --output annotated.json
  ferro-panel annotate -c panel.toml -i tests.json --targets targets.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate panel test results
    Annotate {
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// JSON list of panel test results
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// JSON panel target specification
        #[arg(long)]
        targets: Option<PathBuf>,

        /// Log filter, overriding the configuration (e.g., "debug")
        #[arg(long)]
        log_level: Option<String>,
    },
    /// Print a sample configuration
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Annotate {
            config,
            input,
            output,
            targets,
            log_level,
        } => run_annotate(&config, &input, &output, targets.as_deref(), log_level.as_deref()),
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&PanelConfig::sample())?);
            Ok(())
        }
    }
}

fn run_annotate(
    config_path: &Path,
    input: &Path,
    output: &Path,
    targets: Option<&Path>,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = PanelConfig::from_file(config_path)?;
    init_tracing(log_level.unwrap_or(&config.logging.level))?;

    let reference = ReferenceData::load(&config.reference)?;
    let (resolver, impacts, exon_codons) = load_annotators(&config.annotators)?;

    let results: Vec<PanelTestResult> = serde_json::from_reader(BufReader::new(File::open(input)?))?;
    let target_specification: PanelTargetSpecification = match targets {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => PanelTargetSpecification::default(),
    };
    info!("Annotating {} panel tests from {}", results.len(), input.display());

    let annotator = PanelAnnotator::new(&reference, &resolver, &impacts, &exon_codons)
        .with_tmb_high_threshold(config.annotation.tmb_high_threshold);

    let mut records: Vec<AnnotatedPanelTest> = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (result, annotated) in results
        .iter()
        .zip(annotator.annotate_all(&results, &target_specification))
    {
        match annotated {
            Ok(record) => records.push(record),
            Err(e) => {
                failures += 1;
                error!("Test {} failed: {}", result.test_name, e.detailed_message());
            }
        }
    }

    write_records(output, &records)?;
    info!("Wrote {} annotated tests ({} failed)", records.len(), failures);

    if failures > 0 {
        return Err(format!("{} of {} tests failed annotation", failures, results.len()).into());
    }
    Ok(())
}

fn load_annotators(
    config: &AnnotatorConfig,
) -> Result<
    (
        FileVariantResolver,
        FileTranscriptImpactAnnotator,
        FileExonCodonLookup,
    ),
    Box<dyn std::error::Error>,
> {
    let resolver = match &config.resolutions_path {
        Some(path) => FileVariantResolver::from_json(path)?,
        None => FileVariantResolver::new(),
    };
    let impacts = match &config.impacts_path {
        Some(path) => FileTranscriptImpactAnnotator::from_json(path)?,
        None => FileTranscriptImpactAnnotator::new(),
    };
    let exon_codons = match &config.exon_codons_path {
        Some(path) => FileExonCodonLookup::from_json(path)?,
        None => FileExonCodonLookup::new(),
    };
    info!(
        "Loaded {} resolutions, {} impacts, {} exon/codon lookups",
        resolver.len(),
        impacts.len(),
        exon_codons.len()
    );
    Ok((resolver, impacts, exon_codons))
}

fn write_records(
    output: &Path,
    records: &[AnnotatedPanelTest],
) -> Result<(), Box<dyn std::error::Error>> {
    let writer: Box<dyn Write> = if output.as_os_str() == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(File::create(output)?)
    };
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    Ok(())
}
