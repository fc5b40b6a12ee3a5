//! Record Loader
//!
//! Turns archive content into program records. Input is either
//! `{"programs": [...]}` or a bare array of programs.
//!
//! Malformed input never aborts the caller: the loader returns whatever
//! records it could read together with the issues it found. Only a failure
//! to read the file itself is a hard error.

use crate::error::Result;
use crate::model::ProgramRecord;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Problem found while loading an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    /// Content is not valid JSON; no records loaded
    Parse(String),
    /// Content is not valid UTF-8; no records loaded
    Encoding(String),
    /// Top-level value is not a program list; no records loaded
    UnexpectedShape(String),
    /// One entry could not be read as a program and was skipped
    SkippedRecord { index: usize, reason: String },
}

impl LoadIssue {
    /// Issues after which the record set is empty
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LoadIssue::SkippedRecord { .. })
    }
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadIssue::Parse(msg) => write!(f, "invalid JSON: {}", msg),
            LoadIssue::Encoding(msg) => write!(f, "invalid UTF-8: {}", msg),
            LoadIssue::UnexpectedShape(msg) => write!(f, "unexpected structure: {}", msg),
            LoadIssue::SkippedRecord { index, reason } => {
                write!(f, "program #{} skipped: {}", index, reason)
            }
        }
    }
}

/// Records read from one archive plus any issues encountered
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub programs: Vec<ProgramRecord>,
    pub issues: Vec<LoadIssue>,
}

impl LoadOutcome {
    fn failed(issue: LoadIssue) -> Self {
        error!("Failed to load archive: {}", issue);
        Self {
            programs: Vec::new(),
            issues: vec![issue],
        }
    }

    /// True when an issue emptied the record set
    pub fn has_fatal_issue(&self) -> bool {
        self.issues.iter().any(LoadIssue::is_fatal)
    }
}

/// Parse decoded archive text into program records
pub fn load_programs(content: &str) -> LoadOutcome {
    let data: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => return LoadOutcome::failed(LoadIssue::Parse(e.to_string())),
    };

    let entries = match data {
        Value::Object(mut map) => match map.remove("programs") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return LoadOutcome::failed(LoadIssue::UnexpectedShape(format!(
                    "'programs' is {}, expected an array",
                    json_kind(&other)
                )))
            }
            None => {
                return LoadOutcome::failed(LoadIssue::UnexpectedShape(
                    "object without a 'programs' field".to_string(),
                ))
            }
        },
        Value::Array(entries) => entries,
        other => {
            return LoadOutcome::failed(LoadIssue::UnexpectedShape(format!(
                "top-level value is {}, expected an array or object",
                json_kind(&other)
            )))
        }
    };

    let mut outcome = LoadOutcome {
        programs: Vec::with_capacity(entries.len()),
        issues: Vec::new(),
    };

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ProgramRecord>(entry) {
            Ok(program) => outcome.programs.push(program),
            Err(e) => {
                warn!("Skipping program #{}: {}", index, e);
                outcome.issues.push(LoadIssue::SkippedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        "Loaded {} programs ({} skipped)",
        outcome.programs.len(),
        outcome.issues.len()
    );
    outcome
}

/// Decode raw bytes as UTF-8, then parse
pub fn load_programs_from_bytes(bytes: &[u8]) -> LoadOutcome {
    match std::str::from_utf8(bytes) {
        Ok(content) => load_programs(content),
        Err(e) => LoadOutcome::failed(LoadIssue::Encoding(e.to_string())),
    }
}

/// Read an archive file from disk
///
/// # Errors
///
/// Returns `TransformError::Io` if the file cannot be read. Content
/// problems are reported through [`LoadOutcome::issues`] instead.
pub fn load_programs_from_file(path: &Path) -> Result<LoadOutcome> {
    let bytes = std::fs::read(path)?;
    info!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(load_programs_from_bytes(&bytes))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
