#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident data source definitions and CSV file loading.
//!
//! Each city's CSV export is described by a [`source_def::SourceDefinition`]
//! TOML config: which columns hold the coordinates and labels, the timestamp
//! format, and the downtown reference point. A single generic loader in
//! [`csv_file`] handles all sources, eliminating per-city duplication.

pub mod csv_file;
pub mod parsing;
pub mod progress;
pub mod registry;
pub mod source_def;

/// Errors that can occur while loading incident data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (missing or unreadable input file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A source definition TOML failed to parse.
    #[error("Source definition error: {0}")]
    Definition(#[from] toml::de::Error),

    /// The input file does not satisfy the source's column contract.
    #[error("Schema error: {message}")]
    Schema {
        /// Description of what went wrong.
        message: String,
    },
}
