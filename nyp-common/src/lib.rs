//! # NYP Common Library
//!
//! Shared code for the NYP archive tools including:
//! - Error types
//! - Configuration loading (TOML file + resolution order)
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
