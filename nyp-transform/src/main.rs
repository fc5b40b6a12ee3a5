//! nyp-transform - soloist collaboration edge list from the NYP archive
//!
//! **Usage:**
//! ```bash
//! nyp-transform [--output <FILE>] [--download-copy[=<FILE>]] [--observations <FILE>]
//!               [--canonical-pairs] [--config <FILE>] <INPUT>
//! ```
//!
//! Writes `Source,Target,Weight` rows for every pair of soloists credited
//! on the same work. Malformed archives are reported and produce a
//! header-only edge list; unreadable or unwritable files abort the run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nyp_common::config::{ConfigResolver, ConfigSource, TomlConfig, DEFAULT_DOWNLOAD_FILE};
use nyp_common::logging::init_tracing;
use nyp_transform::pipeline::{self, OutputPaths, PipelineOptions, PipelineReport};
use nyp_transform::PairOrder;
use tracing::{error, info, warn};

/// Command-line arguments for nyp-transform
#[derive(Parser, Debug)]
#[command(name = "nyp-transform")]
#[command(about = "Convert an NYP performance-history archive into a soloist collaboration edge list")]
#[command(version)]
struct Args {
    /// JSON archive: {"programs": [...]} or a bare array of programs
    #[arg(env = "NYP_INPUT")]
    input: PathBuf,

    /// Edge list CSV path
    #[arg(short, long, value_name = "FILE", env = "NYP_OUTPUT")]
    output: Option<PathBuf>,

    /// Also write a copy of the edge list
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_DOWNLOAD_FILE
    )]
    download_copy: Option<PathBuf>,

    /// Write the raw observation table (Source, Target, Date, WorkID)
    #[arg(long, value_name = "FILE")]
    observations: Option<PathBuf>,

    /// Treat (A,B) and (B,A) as the same pair
    #[arg(long)]
    canonical_pairs: bool,

    /// Configuration file (overrides NYP_TRANSFORM_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Combine CLI arguments with configuration; CLI wins
fn effective_settings(args: &Args, config: &TomlConfig) -> (OutputPaths, PipelineOptions) {
    let paths = OutputPaths {
        edges: args.output.clone().unwrap_or_else(|| config.output.clone()),
        download_copy: args.download_copy.clone().or_else(|| config.download_copy.clone()),
        observations: args.observations.clone().or_else(|| config.observations.clone()),
    };
    let options = PipelineOptions {
        pair_order: PairOrder::from_canonical_flag(args.canonical_pairs || config.canonical_pairs),
    };
    (paths, options)
}

fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::CommandLine(p) => info!("Config: {} (from --config)", p.display()),
        ConfigSource::Environment(p) => info!("Config: {} (from environment)", p.display()),
        ConfigSource::PlatformDefault(p) => info!("Config: {}", p.display()),
        ConfigSource::MissingFile(p) => {
            warn!("Config file {} not found; using defaults", p.display())
        }
        ConfigSource::CompiledDefaults => info!("No config file; using defaults"),
    }
}

fn print_summary(report: &PipelineReport, paths: &OutputPaths) {
    println!("Programs loaded:  {}", report.programs_loaded);
    println!("Issues:           {}", report.issues.len());
    println!("Observations:     {}", report.observations.len());
    println!("Edges:            {}", report.edges.len());
    println!("Total weight:     {}", report.total_weight());
    println!("\n✓ Edge list saved to: {}", paths.edges.display());
    if let Some(copy) = &paths.download_copy {
        println!("✓ Copy saved to: {}", copy.display());
    }
    if let Some(observations) = &paths.observations {
        println!("✓ Observations saved to: {}", observations.display());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let resolved = ConfigResolver::new("nyp-transform")
        .resolve(args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&resolved.config.logging).context("Failed to initialise logging")?;

    info!(
        "Starting nyp-transform v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    log_config_source(&resolved.source);

    let (paths, options) = effective_settings(&args, &resolved.config);
    info!("Input: {}", args.input.display());
    info!("Pair order: {:?}", options.pair_order);

    let report = pipeline::run_file(&args.input, &options)
        .with_context(|| format!("Failed to read archive {}", args.input.display()))?;

    if report.load_failed() {
        error!("No programs loaded; the edge list will contain only the header");
    }

    pipeline::write_outputs(&report, &paths).context("Failed to write output")?;

    print_summary(&report, &paths);
    Ok(())
}
