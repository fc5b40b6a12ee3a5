//! CSV export of edge and observation tables
//!
//! The header row is always written, so an empty table still produces a
//! valid file. No index column.

use crate::error::Result;
use crate::model::{AggregatedEdge, RawEdgeObservation};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Header of the edge list
pub const EDGE_HEADER: [&str; 3] = ["Source", "Target", "Weight"];

/// Header of the raw observation table
pub const OBSERVATION_HEADER: [&str; 4] = ["Source", "Target", "Date", "WorkID"];

fn write_table<W, T>(header: &[&str], rows: &[T], writer: W) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the edge list (`Source,Target,Weight`)
pub fn write_edges<W: Write>(edges: &[AggregatedEdge], writer: W) -> Result<()> {
    write_table(&EDGE_HEADER, edges, writer)
}

/// Write the raw observation table (`Source,Target,Date,WorkID`)
pub fn write_observations<W: Write>(observations: &[RawEdgeObservation], writer: W) -> Result<()> {
    write_table(&OBSERVATION_HEADER, observations, writer)
}

/// Write the edge list to a file, replacing any existing file
pub fn write_edges_file(edges: &[AggregatedEdge], path: &Path) -> Result<()> {
    write_edges(edges, File::create(path)?)?;
    info!("Edge list saved to {} ({} rows)", path.display(), edges.len());
    Ok(())
}

/// Write the raw observation table to a file, replacing any existing file
pub fn write_observations_file(observations: &[RawEdgeObservation], path: &Path) -> Result<()> {
    write_observations(observations, File::create(path)?)?;
    info!(
        "Observation table saved to {} ({} rows)",
        path.display(),
        observations.len()
    );
    Ok(())
}

/// Render the edge list as a CSV string
pub fn edges_to_csv_string(edges: &[AggregatedEdge]) -> Result<String> {
    let mut buf = Vec::new();
    write_edges(edges, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
