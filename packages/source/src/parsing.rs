//! Shared parsing utilities for incident CSV cells.
//!
//! Timestamp and coordinate parsing used by the generic CSV loader. Cell
//! failures never raise: a bad value becomes `None` on the raw record and
//! the cleaning stage decides whether the row survives.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses a timestamp cell using a chrono format string (e.g.
/// `"%m/%d/%Y %I:%M:%S %p"`).
///
/// Returns `None` when the cell does not match the format; the row keeps a
/// null timestamp rather than raising.
#[must_use]
pub fn parse_timestamp(s: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s.trim(), format)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parses a coordinate cell to `f64`.
///
/// Returns `None` when the cell is missing, empty, or unparseable. Zero
/// values are preserved; the cleaning stage rejects them so that the raw
/// record faithfully reflects the file contents.
#[must_use]
pub fn parse_coordinate(s: Option<&str>) -> Option<f64> {
    let trimmed = s?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_la_style_timestamp() {
        let dt = parse_timestamp("01/15/2021 02:30:00 PM", "%m/%d/%Y %I:%M:%S %p").unwrap();
        assert_eq!(dt.to_string(), "2021-01-15 14:30:00 UTC");
    }

    #[test]
    fn parses_iso_style_timestamp() {
        let dt = parse_timestamp("2022-06-09 15:24:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(dt.to_string(), "2022-06-09 15:24:00 UTC");
    }

    #[test]
    fn rejects_mismatched_format() {
        assert!(parse_timestamp("2022-06-09 15:24:00", "%m/%d/%Y %I:%M:%S %p").is_none());
        assert!(parse_timestamp("not-a-date", "%Y-%m-%d %H:%M:%S").is_none());
    }

    #[test]
    fn parses_coordinate_values() {
        assert_eq!(parse_coordinate(Some("34.0522")), Some(34.0522));
        assert_eq!(parse_coordinate(Some(" -118.2437 ")), Some(-118.2437));
    }

    #[test]
    fn preserves_zero_coordinates() {
        // Zero is a sentinel the cleaner rejects, not a parse failure.
        assert_eq!(parse_coordinate(Some("0")), Some(0.0));
        assert_eq!(parse_coordinate(Some("0.0")), Some(0.0));
    }

    #[test]
    fn rejects_missing_or_garbage_coordinates() {
        assert_eq!(parse_coordinate(None), None);
        assert_eq!(parse_coordinate(Some("")), None);
        assert_eq!(parse_coordinate(Some("n/a")), None);
    }
}
