#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive heatmap artifact generation.
//!
//! Renders cleaned incidents as a self-contained Leaflet page with a heat
//! layer, optionally overlaying a boundary `GeoJSON` file and annotating the
//! top areas with labels at their median coordinates. The page is the only
//! persisted artifact of a pipeline run.

pub mod heatmap;

pub use heatmap::{HeatmapOptions, write_heatmap};

/// Errors that can occur while generating artifacts.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// I/O error (unreadable boundary file, unwritable output path).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedded data serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The boundary file is not valid `GeoJSON`.
    #[error("Boundary error: {message}")]
    Boundary {
        /// Description of what went wrong.
        message: String,
    },
}
