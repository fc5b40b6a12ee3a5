//! Collaboration Extractor
//!
//! Expands every work's soloist list into all pairs of credited soloists.
//! Each pair is one observation tagged with the program date and work ID.
//!
//! Rules:
//! - Programs without a usable date contribute nothing
//! - Intermission entries contribute nothing
//! - Pairs with identical names (after trimming) are dropped
//! - Duplicated names stay in the list, so they pair with everyone else

use crate::model::{ProgramRecord, RawEdgeObservation};
use tracing::{debug, info};

/// How the two names of a pair are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PairOrder {
    /// Source is the soloist listed first on the work
    #[default]
    AsListed,
    /// Source is the lexicographically smaller name; (A,B) and (B,A) coincide
    Canonical,
}

impl PairOrder {
    pub fn from_canonical_flag(canonical: bool) -> Self {
        if canonical {
            PairOrder::Canonical
        } else {
            PairOrder::AsListed
        }
    }

    fn orient<'a>(&self, first: &'a str, second: &'a str) -> (&'a str, &'a str) {
        match self {
            PairOrder::Canonical if second < first => (second, first),
            _ => (first, second),
        }
    }
}

/// Counters collected during one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub programs: usize,
    pub programs_without_date: usize,
    pub works: usize,
    pub intermissions: usize,
    pub observations: usize,
}

/// Derives collaboration observations from program records
#[derive(Debug, Clone, Default)]
pub struct CollaborationExtractor {
    pair_order: PairOrder,
}

impl CollaborationExtractor {
    pub fn new(pair_order: PairOrder) -> Self {
        Self { pair_order }
    }

    pub fn pair_order(&self) -> PairOrder {
        self.pair_order
    }

    /// Extract all observations, in program then work then pair order
    pub fn extract(&self, records: &[ProgramRecord]) -> Vec<RawEdgeObservation> {
        self.extract_with_stats(records).0
    }

    /// Extract observations and report what was skipped
    pub fn extract_with_stats(
        &self,
        records: &[ProgramRecord],
    ) -> (Vec<RawEdgeObservation>, ExtractionStats) {
        let mut observations = Vec::new();
        let mut stats = ExtractionStats {
            programs: records.len(),
            ..Default::default()
        };

        for (index, program) in records.iter().enumerate() {
            stats.works += program.works.len();

            let Some(date) = program.concert_date() else {
                if !program.works.is_empty() {
                    debug!("Program #{} has no usable date; {} works ignored", index, program.works.len());
                }
                stats.programs_without_date += 1;
                continue;
            };

            for work in &program.works {
                if work.is_intermission() {
                    stats.intermissions += 1;
                    continue;
                }

                let soloists = work.soloist_names();
                for (i, first) in soloists.iter().enumerate() {
                    for second in &soloists[i + 1..] {
                        if first == second {
                            continue;
                        }
                        let (source, target) = self.pair_order.orient(first, second);
                        observations.push(RawEdgeObservation {
                            source: source.to_string(),
                            target: target.to_string(),
                            date: date.to_string(),
                            work_id: work.work_id().to_string(),
                        });
                    }
                }
            }
        }

        stats.observations = observations.len();
        info!(
            "Extracted {} observations from {} programs ({} without date, {} intermissions)",
            stats.observations, stats.programs, stats.programs_without_date, stats.intermissions
        );
        (observations, stats)
    }
}

/// Extract with listing-order pairs
pub fn extract(records: &[ProgramRecord]) -> Vec<RawEdgeObservation> {
    CollaborationExtractor::default().extract(records)
}
