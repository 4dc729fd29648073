#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytics result types.
//!
//! Typed results returned by the grouping and summary helpers, consumed by
//! rendering collaborators (heatmap export, CLI tables) without re-deriving
//! anything from the record collections.

use proximity_map_incident_models::ProximityCategory;
use serde::{Deserialize, Serialize};

/// Number of incidents sharing one group label (area or street).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    /// The group label.
    pub label: String,
    /// How many incidents carry it.
    pub count: u64,
}

/// Median label-placement anchor for a subset of incidents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedianPoint {
    /// Median latitude of the subset.
    pub latitude: f64,
    /// Median longitude of the subset.
    pub longitude: f64,
}

/// Axis-aligned coordinate extent of a record subset, with the display
/// buffer already applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateBounds {
    /// Southern edge.
    pub min_latitude: f64,
    /// Northern edge.
    pub max_latitude: f64,
    /// Western edge.
    pub min_longitude: f64,
    /// Eastern edge.
    pub max_longitude: f64,
}

/// Incident count for one proximity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// The proximity bucket.
    pub category: ProximityCategory,
    /// How many incidents fell into it.
    pub count: u64,
}

/// Summary of one pipeline run: the "run completed with N records" report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Rows loaded from the source files before cleaning.
    pub raw_count: u64,
    /// Records surviving the cleaning stage.
    pub clean_count: u64,
    /// Per-category counts, in `Close`, `Medium`, `Far` order. Categories
    /// with no incidents are present with a zero count.
    pub categories: Vec<CategoryCount>,
}
