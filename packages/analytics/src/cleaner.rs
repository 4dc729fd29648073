//! Cleaning stage: drops rows that violate the coordinate and timestamp
//! invariants and restricts records to the configured year range.

use chrono::Datelike as _;
use proximity_map_incident_models::{CleanIncident, RawIncident, YearRange};

/// Returns validated coordinates. `None` if either is missing or zero.
///
/// Both configured city exports use 0/0 as their "location withheld"
/// placeholder, so zero is treated the same as missing.
fn valid_coordinates(lat: Option<f64>, lng: Option<f64>) -> Option<(f64, f64)> {
    let latitude = lat?;
    let longitude = lng?;
    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }
    Some((latitude, longitude))
}

/// Cleans raw incidents into [`CleanIncident`] records.
///
/// Rows with missing or zero coordinates, a missing timestamp, or a year
/// outside `year_range` are silently excluded; that exclusion is the
/// accepted policy for malformed rows, not an error condition. Surviving
/// records keep their relative input order.
#[must_use]
pub fn clean(raw: &[RawIncident], year_range: YearRange) -> Vec<CleanIncident> {
    let raw_count = raw.len();
    let mut incidents = Vec::with_capacity(raw_count);

    for record in raw {
        let Some((latitude, longitude)) = valid_coordinates(record.latitude, record.longitude)
        else {
            continue;
        };

        let Some(occurred_at) = record.occurred_at else {
            continue;
        };

        let year = occurred_at.year();
        if !year_range.contains(year) {
            continue;
        }

        incidents.push(CleanIncident {
            occurred_at,
            year,
            latitude,
            longitude,
            area: record.area.clone(),
            weapon: record.weapon.clone(),
        });
    }

    log::info!(
        "Cleaned {} incidents from {raw_count} raw records",
        incidents.len()
    );
    incidents
}
