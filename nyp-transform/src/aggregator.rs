//! Edge Aggregator
//!
//! Groups observations by their literal (source, target) pair and counts
//! them. Output is sorted ascending by (source, target).

use crate::model::{AggregatedEdge, RawEdgeObservation};
use std::collections::BTreeMap;
use tracing::debug;

/// Count observations per (source, target) pair
pub fn aggregate(observations: &[RawEdgeObservation]) -> Vec<AggregatedEdge> {
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for obs in observations {
        *counts
            .entry((obs.source.as_str(), obs.target.as_str()))
            .or_insert(0) += 1;
    }

    let edges = into_edges(counts);
    debug!("Aggregated {} observations into {} edges", observations.len(), edges.len());
    edges
}

/// Re-group weighted edges by pair, summing weights
///
/// Applying this to the output of [`aggregate`] returns it unchanged.
pub fn merge_weighted(edges: &[AggregatedEdge]) -> Vec<AggregatedEdge> {
    let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for edge in edges {
        *counts
            .entry((edge.source.as_str(), edge.target.as_str()))
            .or_insert(0) += edge.weight;
    }
    into_edges(counts)
}

/// Sum of all edge weights
pub fn total_weight(edges: &[AggregatedEdge]) -> u64 {
    edges.iter().map(|e| e.weight).sum()
}

fn into_edges(counts: BTreeMap<(&str, &str), u64>) -> Vec<AggregatedEdge> {
    counts
        .into_iter()
        .map(|((source, target), weight)| AggregatedEdge::new(source, target, weight))
        .collect()
}
