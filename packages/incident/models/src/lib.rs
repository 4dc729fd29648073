#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident record types and the proximity category taxonomy.
//!
//! This crate defines the canonical record shapes shared across the entire
//! proximity-map system. Data sources produce [`RawIncident`] rows, the
//! cleaning stage refines them into [`CleanIncident`], and the classifier
//! attaches the distance-derived [`ProximityCategory`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default breakpoint between [`ProximityCategory::Close`] and
/// [`ProximityCategory::Medium`], in coordinate degrees.
pub const DEFAULT_CLOSE_MAX: f64 = 0.02;

/// Default breakpoint between [`ProximityCategory::Medium`] and
/// [`ProximityCategory::Far`], in coordinate degrees.
pub const DEFAULT_MEDIUM_MAX: f64 = 0.05;

/// Proximity bucket for an incident's distance to the reference point.
///
/// Ordered: `Close < Medium < Far`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProximityCategory {
    /// Distance in `[0, close_max)` degrees from the reference point
    Close,
    /// Distance in `[close_max, medium_max)` degrees
    Medium,
    /// Distance in `[medium_max, ∞)` degrees
    Far,
}

impl ProximityCategory {
    /// Buckets a degree-space distance using the given breakpoints.
    ///
    /// Boundaries are half-open: a distance exactly at `close_max` is
    /// `Medium`, and exactly at `medium_max` is `Far`.
    #[must_use]
    pub fn from_distance(distance: f64, breakpoints: ProximityBreakpoints) -> Self {
        if distance < breakpoints.close_max {
            Self::Close
        } else if distance < breakpoints.medium_max {
            Self::Medium
        } else {
            Self::Far
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Close, Self::Medium, Self::Far]
    }
}

/// Distance breakpoints (in coordinate degrees) for proximity bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityBreakpoints {
    /// Distances below this are `Close`.
    pub close_max: f64,
    /// Distances below this (and at or above `close_max`) are `Medium`.
    pub medium_max: f64,
}

impl ProximityBreakpoints {
    /// Creates breakpoints from explicit bucket boundaries.
    #[must_use]
    pub const fn new(close_max: f64, medium_max: f64) -> Self {
        Self {
            close_max,
            medium_max,
        }
    }
}

impl Default for ProximityBreakpoints {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_MAX, DEFAULT_MEDIUM_MAX)
    }
}

/// A latitude/longitude pair (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees (negative in the western hemisphere).
    pub longitude: f64,
}

/// A closed year interval used by the cleaning stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// First year kept, inclusive.
    pub min: i32,
    /// Last year kept, inclusive.
    pub max: i32,
}

impl YearRange {
    /// Creates a closed year interval `[min, max]`.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `year` falls inside the interval, inclusive on
    /// both ends.
    #[must_use]
    pub const fn contains(self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

/// One reported incident row as loaded from a source CSV.
///
/// Every field that the source may omit or fail to parse is optional;
/// nothing is dropped or defaulted at load time. The cleaning stage decides
/// which rows survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncident {
    /// When the incident occurred. `None` when the source cell is missing
    /// or does not match the source's configured timestamp format.
    pub occurred_at: Option<DateTime<Utc>>,
    /// Latitude. `None` when missing or unparseable (zero values are kept).
    pub latitude: Option<f64>,
    /// Longitude. `None` when missing or unparseable (zero values are kept).
    pub longitude: Option<f64>,
    /// Area or street label used for grouping.
    pub area: Option<String>,
    /// Weapon/shooting indicator. `None` when the source cell is empty.
    pub weapon: Option<String>,
}

/// An incident that satisfied every cleaning invariant.
///
/// Coordinates are present and non-zero, the timestamp parsed, and `year`
/// lies inside the configured [`YearRange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanIncident {
    /// When the incident occurred.
    pub occurred_at: DateTime<Utc>,
    /// Year extracted from `occurred_at`.
    pub year: i32,
    /// Latitude (non-zero).
    pub latitude: f64,
    /// Longitude (non-zero).
    pub longitude: f64,
    /// Area or street label used for grouping.
    pub area: Option<String>,
    /// Weapon/shooting indicator.
    pub weapon: Option<String>,
}

/// A cleaned incident plus its derived proximity features.
///
/// Immutable after classification; the distance is Euclidean in coordinate
/// degrees, not geodesic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityIncident {
    /// The underlying cleaned incident.
    pub incident: CleanIncident,
    /// Degree-space distance to the source's reference point.
    pub distance: f64,
    /// Bucketed proximity classification.
    pub category: ProximityCategory,
}
