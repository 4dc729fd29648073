//! Config-driven incident data source definition.
//!
//! [`SourceDefinition`] captures everything unique about a city's CSV
//! export in a serializable config struct: column names, the timestamp
//! format, the downtown reference point, and heatmap rendering defaults.
//! A single generic loader handles all sources, eliminating the per-city
//! script duplication of one-off analyses.

use chrono::{DateTime, Utc};
use proximity_map_incident_models::Coordinate;
use serde::Deserialize;

use crate::parsing::parse_timestamp;

/// A complete, config-driven incident data source definition.
///
/// Loaded from TOML files baked into the binary at compile time (see
/// [`crate::registry`]).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"la"`).
    pub id: String,
    /// Human-readable name (e.g., `"Los Angeles Police Department"`).
    pub name: String,
    /// City covered by this source.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// Downtown reference point for proximity classification.
    pub reference: Coordinate,
    /// Heatmap rendering defaults for this city.
    pub heatmap: HeatmapDefaults,
    /// Column mappings for normalization.
    pub fields: FieldMapping,
}

/// Default rendering parameters for this city's heatmap artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct HeatmapDefaults {
    /// Initial map center.
    pub center: Coordinate,
    /// Initial zoom level.
    pub zoom: u8,
}

/// Maps source-specific CSV column names to canonical incident fields.
///
/// Column names differ per city export (`LAT`/`LON` vs `Lat`/`Long`) and
/// are configured here, never inferred from the file.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMapping {
    /// Latitude column name.
    pub lat: String,
    /// Longitude column name.
    pub lng: String,
    /// How to extract the occurrence timestamp.
    pub occurred_at: TimestampExtractor,
    /// Optional column holding the area/street label used for grouping.
    pub area: Option<String>,
    /// Optional column holding the weapon/shooting indicator.
    pub weapon: Option<String>,
}

/// How to extract the occurrence timestamp from a CSV cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimestampExtractor {
    /// Single column parsed with a chrono format string.
    Format {
        /// CSV column name.
        field: String,
        /// chrono format string (e.g., `"%m/%d/%Y %I:%M:%S %p"`).
        format: String,
    },
    /// Column with a trailing numeric UTC-offset suffix (e.g., `+00`) that
    /// is stripped before parsing. Boston's export appends one to an
    /// otherwise offset-less timestamp.
    FormatTrimOffset {
        /// CSV column name.
        field: String,
        /// chrono format string applied after the suffix is stripped.
        format: String,
    },
}

impl TimestampExtractor {
    /// The CSV column this extractor reads.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Format { field, .. } | Self::FormatTrimOffset { field, .. } => field,
        }
    }

    /// Parses a raw cell value.
    ///
    /// Returns `None` when the cell does not match the configured format;
    /// the row keeps a null timestamp rather than raising.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::Format { format, .. } => parse_timestamp(raw, format),
            Self::FormatTrimOffset { format, .. } => {
                parse_timestamp(trim_offset_suffix(raw), format)
            }
        }
    }
}

/// Strips a trailing `+NN` numeric offset suffix, if present.
///
/// `"2021-06-09 15:24:00+00"` → `"2021-06-09 15:24:00"`. Anything other
/// than an all-digit suffix after the final `+` is left untouched.
fn trim_offset_suffix(raw: &str) -> &str {
    raw.rfind('+').map_or(raw, |idx| {
        let suffix = &raw[idx + 1..];
        if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
            &raw[..idx]
        } else {
            raw
        }
    })
}

/// Parses a source definition from TOML text.
///
/// # Errors
///
/// Returns a [`toml::de::Error`] if the text is not a valid definition.
pub fn parse_source_toml(contents: &str) -> Result<SourceDefinition, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
id = "la"
name = "Los Angeles Police Department"
city = "Los Angeles"
state = "CA"

[reference]
latitude = 34.0522
longitude = -118.2437

[heatmap]
zoom = 10

[heatmap.center]
latitude = 34.05
longitude = -118.25

[fields]
lat = "LAT"
lng = "LON"
area = "AREA NAME"
weapon = "Weapon Used Cd"

[fields.occurred_at]
type = "format"
field = "DATE OCC"
format = "%m/%d/%Y %I:%M:%S %p"
"#;

    #[test]
    fn parses_sample_definition() {
        let def = parse_source_toml(SAMPLE).unwrap();
        assert_eq!(def.id, "la");
        assert_eq!(def.fields.lat, "LAT");
        assert_eq!(def.fields.occurred_at.field(), "DATE OCC");
        assert!((def.reference.longitude - -118.2437).abs() < f64::EPSILON);
    }

    #[test]
    fn format_extractor_parses_and_rejects() {
        let extractor = TimestampExtractor::Format {
            field: "DATE OCC".to_string(),
            format: "%m/%d/%Y %I:%M:%S %p".to_string(),
        };
        assert!(extractor.parse("01/01/2021 12:00:00 AM").is_some());
        assert!(extractor.parse("2021-01-01 00:00:00").is_none());
    }

    #[test]
    fn trim_offset_extractor_strips_suffix() {
        let extractor = TimestampExtractor::FormatTrimOffset {
            field: "OCCURRED_ON_DATE".to_string(),
            format: "%Y-%m-%d %H:%M:%S".to_string(),
        };
        let dt = extractor.parse("2021-06-09 15:24:00+00").unwrap();
        assert_eq!(dt.to_string(), "2021-06-09 15:24:00 UTC");
        // Also accepts cells without the suffix.
        assert!(extractor.parse("2021-06-09 15:24:00").is_some());
    }

    #[test]
    fn trim_offset_leaves_non_numeric_suffixes() {
        assert_eq!(trim_offset_suffix("2021-06-09 15:24:00+00"), "2021-06-09 15:24:00");
        assert_eq!(trim_offset_suffix("15:24+abc"), "15:24+abc");
        assert_eq!(trim_offset_suffix("no-offset"), "no-offset");
    }
}
