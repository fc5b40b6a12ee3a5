//! Loader → Extractor → Aggregator in one synchronous pass
//!
//! A parse failure is reported in the returned [`PipelineReport`] and leaves
//! every table empty; it is not an error. Only file system failures are.

use crate::aggregator::{aggregate, total_weight};
use crate::error::Result;
use crate::export::{write_edges_file, write_observations_file};
use crate::extractor::{CollaborationExtractor, ExtractionStats, PairOrder};
use crate::loader::{self, LoadIssue, LoadOutcome};
use crate::model::{AggregatedEdge, RawEdgeObservation};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub pair_order: PairOrder,
}

/// Everything one run produced
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub programs_loaded: usize,
    pub issues: Vec<LoadIssue>,
    pub observations: Vec<RawEdgeObservation>,
    pub edges: Vec<AggregatedEdge>,
    pub stats: ExtractionStats,
}

impl PipelineReport {
    pub fn total_weight(&self) -> u64 {
        total_weight(&self.edges)
    }

    /// True when loading failed outright (all tables are empty)
    pub fn load_failed(&self) -> bool {
        self.issues.iter().any(LoadIssue::is_fatal)
    }
}

/// Files written after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Edge list artifact
    pub edges: PathBuf,
    /// Secondary copy of the edge list
    pub download_copy: Option<PathBuf>,
    /// Raw observation table
    pub observations: Option<PathBuf>,
}

/// Run the pipeline on decoded archive text
pub fn run(content: &str, options: &PipelineOptions) -> PipelineReport {
    run_loaded(loader::load_programs(content), options)
}

/// Run the pipeline on raw archive bytes (UTF-8 expected)
pub fn run_bytes(bytes: &[u8], options: &PipelineOptions) -> PipelineReport {
    run_loaded(loader::load_programs_from_bytes(bytes), options)
}

/// Read an archive file and run the pipeline on it
///
/// # Errors
///
/// Returns `TransformError::Io` if the file cannot be read.
pub fn run_file(path: &Path, options: &PipelineOptions) -> Result<PipelineReport> {
    let outcome = loader::load_programs_from_file(path)?;
    Ok(run_loaded(outcome, options))
}

fn run_loaded(outcome: LoadOutcome, options: &PipelineOptions) -> PipelineReport {
    let LoadOutcome { programs, issues } = outcome;

    let extractor = CollaborationExtractor::new(options.pair_order);
    let (observations, stats) = extractor.extract_with_stats(&programs);
    let edges = aggregate(&observations);

    info!(
        "{} programs → {} observations → {} edges",
        programs.len(),
        observations.len(),
        edges.len()
    );

    PipelineReport {
        programs_loaded: programs.len(),
        issues,
        observations,
        edges,
        stats,
    }
}

/// Write the report's tables to the requested files
///
/// # Errors
///
/// Returns the first I/O or CSV failure; files written before it remain.
pub fn write_outputs(report: &PipelineReport, paths: &OutputPaths) -> Result<()> {
    write_edges_file(&report.edges, &paths.edges)?;

    if let Some(copy) = &paths.download_copy {
        write_edges_file(&report.edges, copy)?;
    }

    if let Some(observations) = &paths.observations {
        write_observations_file(&report.observations, observations)?;
    }

    Ok(())
}
