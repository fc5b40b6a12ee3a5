//! nyp-transform library
//!
//! Converts a New York Philharmonic performance-history archive into a
//! weighted soloist collaboration edge list.
//!
//! ```text
//! JSON archive ──▶ loader ──▶ extractor ──▶ aggregator ──▶ export (CSV)
//! ```
//!
//! Each stage takes the previous stage's output as an explicit argument;
//! [`pipeline`] chains them.

pub mod aggregator;
pub mod error;
pub mod export;
pub mod extractor;
pub mod loader;
pub mod model;
pub mod pipeline;

pub use crate::error::{Result, TransformError};
pub use crate::extractor::{CollaborationExtractor, PairOrder};
pub use crate::model::{AggregatedEdge, ProgramRecord, RawEdgeObservation};
pub use crate::pipeline::{PipelineOptions, PipelineReport};
