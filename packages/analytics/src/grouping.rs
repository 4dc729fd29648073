//! Grouping helpers used by rendering collaborators.
//!
//! Frequency ranking of area/street labels, median label-placement anchors,
//! and display bounds. All helpers tolerate empty inputs: a subset with no
//! records yields `None` or an empty result, never an error.

use std::collections::{HashMap, HashSet};

use proximity_map_analytics_models::{CoordinateBounds, GroupCount, MedianPoint};
use proximity_map_incident_models::{CleanIncident, ProximityIncident};

/// Buffer in degrees added around a subset's extent for display bounds.
const BOUNDS_BUFFER_DEGREES: f64 = 0.01;

/// Frequency ranking direction.
enum Ranking {
    MostFrequent,
    LeastFrequent,
}

/// The `n` most frequent area labels, plus the records carrying them.
///
/// Ties are broken by first-encountered order. Fewer than `n` distinct
/// labels returns all of them, never padded. Records without a label are
/// excluded from grouping. The returned record subset preserves input
/// order.
#[must_use]
pub fn top_areas(incidents: &[CleanIncident], n: usize) -> (Vec<GroupCount>, Vec<&CleanIncident>) {
    rank_areas(incidents, n, &Ranking::MostFrequent)
}

/// The `n` least frequent area labels, plus the records carrying them.
///
/// Symmetric counterpart of [`top_areas`].
#[must_use]
pub fn bottom_areas(
    incidents: &[CleanIncident],
    n: usize,
) -> (Vec<GroupCount>, Vec<&CleanIncident>) {
    rank_areas(incidents, n, &Ranking::LeastFrequent)
}

fn rank_areas<'a>(
    incidents: &'a [CleanIncident],
    n: usize,
    ranking: &Ranking,
) -> (Vec<GroupCount>, Vec<&'a CleanIncident>) {
    // label -> (count, first-encountered index); the index keeps ties stable
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (i, incident) in incidents.iter().enumerate() {
        let Some(area) = incident.area.as_deref() else {
            continue;
        };
        counts.entry(area).or_insert((0, i)).0 += 1;
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(label, (count, first))| (label, count, first))
        .collect();
    match ranking {
        Ranking::MostFrequent => ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2))),
        Ranking::LeastFrequent => ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2))),
    }
    ranked.truncate(n);

    let selected: HashSet<&str> = ranked.iter().map(|(label, ..)| *label).collect();
    let records = incidents
        .iter()
        .filter(|incident| {
            incident
                .area
                .as_deref()
                .is_some_and(|area| selected.contains(area))
        })
        .collect();

    let groups = ranked
        .into_iter()
        .map(|(label, count, _)| GroupCount {
            label: label.to_owned(),
            count,
        })
        .collect();

    (groups, records)
}

/// Median latitude and longitude of a record subset.
///
/// The two coordinate medians are computed independently (the anchor need
/// not coincide with any single record). Returns `None` for an empty
/// subset.
pub fn median_coordinate<'a, I>(incidents: I) -> Option<MedianPoint>
where
    I: IntoIterator<Item = &'a CleanIncident>,
{
    let mut lats = Vec::new();
    let mut lngs = Vec::new();
    for incident in incidents {
        lats.push(incident.latitude);
        lngs.push(incident.longitude);
    }
    if lats.is_empty() {
        return None;
    }

    Some(MedianPoint {
        latitude: median(&mut lats),
        longitude: median(&mut lngs),
    })
}

/// Median of a non-empty value set; the mean of the two middle values for
/// even counts.
fn median(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        f64::midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    }
}

/// Coordinate extent of a record subset, expanded by a 0.01° display
/// buffer. Returns `None` for an empty subset.
pub fn coordinate_bounds<'a, I>(incidents: I) -> Option<CoordinateBounds>
where
    I: IntoIterator<Item = &'a CleanIncident>,
{
    let mut bounds: Option<CoordinateBounds> = None;
    for incident in incidents {
        let entry = bounds.get_or_insert(CoordinateBounds {
            min_latitude: incident.latitude,
            max_latitude: incident.latitude,
            min_longitude: incident.longitude,
            max_longitude: incident.longitude,
        });
        entry.min_latitude = entry.min_latitude.min(incident.latitude);
        entry.max_latitude = entry.max_latitude.max(incident.latitude);
        entry.min_longitude = entry.min_longitude.min(incident.longitude);
        entry.max_longitude = entry.max_longitude.max(incident.longitude);
    }

    bounds.map(|b| CoordinateBounds {
        min_latitude: b.min_latitude - BOUNDS_BUFFER_DEGREES,
        max_latitude: b.max_latitude + BOUNDS_BUFFER_DEGREES,
        min_longitude: b.min_longitude - BOUNDS_BUFFER_DEGREES,
        max_longitude: b.max_longitude + BOUNDS_BUFFER_DEGREES,
    })
}

/// The subset of classified incidents with a weapon/shooting indicator
/// present, as used by the weapon-involvement pair analysis.
#[must_use]
pub fn weapon_incidents(incidents: &[ProximityIncident]) -> Vec<&ProximityIncident> {
    incidents
        .iter()
        .filter(|record| record.incident.weapon.is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone as _, Utc};

    use super::*;

    fn incident(area: Option<&str>, latitude: f64, longitude: f64) -> CleanIncident {
        let naive = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CleanIncident {
            occurred_at: Utc.from_utc_datetime(&naive),
            year: 2021,
            latitude,
            longitude,
            area: area.map(str::to_owned),
            weapon: None,
        }
    }

    fn labels(groups: &[GroupCount]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    #[test]
    fn top_areas_ranks_by_frequency() {
        let incidents = vec![
            incident(Some("Central"), 34.04, -118.25),
            incident(Some("Hollywood"), 34.10, -118.33),
            incident(Some("Central"), 34.05, -118.26),
            incident(Some("Central"), 34.06, -118.24),
            incident(Some("Hollywood"), 34.09, -118.32),
            incident(Some("Harbor"), 33.79, -118.29),
        ];

        let (groups, records) = top_areas(&incidents, 2);
        assert_eq!(labels(&groups), vec!["Central", "Hollywood"]);
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[1].count, 2);
        // Subset keeps only matching records, in input order.
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].area.as_deref(), Some("Central"));
        assert_eq!(records[1].area.as_deref(), Some("Hollywood"));
    }

    #[test]
    fn ties_break_by_first_encountered_order() {
        let incidents = vec![
            incident(Some("B"), 1.0, 1.0),
            incident(Some("A"), 1.0, 1.0),
            incident(Some("C"), 1.0, 1.0),
        ];

        let (groups, _) = top_areas(&incidents, 3);
        assert_eq!(labels(&groups), vec!["B", "A", "C"]);

        let (groups, _) = bottom_areas(&incidents, 3);
        assert_eq!(labels(&groups), vec!["B", "A", "C"]);
    }

    #[test]
    fn fewer_distinct_values_than_n_returns_all() {
        let incidents = vec![
            incident(Some("Central"), 1.0, 1.0),
            incident(Some("Harbor"), 1.0, 1.0),
        ];

        let (groups, _) = top_areas(&incidents, 5);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn unlabeled_records_are_excluded_from_grouping() {
        let incidents = vec![
            incident(None, 1.0, 1.0),
            incident(Some("Central"), 1.0, 1.0),
        ];

        let (groups, records) = top_areas(&incidents, 5);
        assert_eq!(groups.len(), 1);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn bottom_areas_ranks_least_frequent_first() {
        let incidents = vec![
            incident(Some("Central"), 1.0, 1.0),
            incident(Some("Central"), 1.0, 1.0),
            incident(Some("Harbor"), 1.0, 1.0),
        ];

        let (groups, _) = bottom_areas(&incidents, 1);
        assert_eq!(labels(&groups), vec!["Harbor"]);
    }

    #[test]
    fn median_of_odd_subset_is_middle_value() {
        let incidents = vec![
            incident(None, 1.0, 10.0),
            incident(None, 3.0, 30.0),
            incident(None, 2.0, 20.0),
        ];

        let point = median_coordinate(&incidents).unwrap();
        assert!((point.latitude - 2.0).abs() < f64::EPSILON);
        assert!((point.longitude - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn median_of_even_subset_averages_the_middle() {
        let incidents = vec![
            incident(None, 1.0, 10.0),
            incident(None, 2.0, 20.0),
            incident(None, 3.0, 30.0),
            incident(None, 4.0, 40.0),
        ];

        let point = median_coordinate(&incidents).unwrap();
        assert!((point.latitude - 2.5).abs() < f64::EPSILON);
        assert!((point.longitude - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn median_of_empty_subset_is_none() {
        let empty: Vec<CleanIncident> = Vec::new();
        assert!(median_coordinate(&empty).is_none());
        assert!(coordinate_bounds(&empty).is_none());
    }

    #[test]
    fn weapon_incidents_keeps_only_flagged_records() {
        use proximity_map_incident_models::{
            ProximityBreakpoints, ProximityCategory, ProximityIncident,
        };

        let mut armed = incident(Some("Central"), 34.05, -118.25);
        armed.weapon = Some("400".to_owned());
        let unarmed = incident(Some("Harbor"), 33.79, -118.29);

        let classified: Vec<ProximityIncident> = [armed, unarmed]
            .into_iter()
            .map(|record| ProximityIncident {
                distance: 0.0,
                category: ProximityCategory::from_distance(0.0, ProximityBreakpoints::default()),
                incident: record,
            })
            .collect();

        let flagged = weapon_incidents(&classified);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].incident.area.as_deref(), Some("Central"));
    }

    #[test]
    fn bounds_include_display_buffer() {
        let incidents = vec![
            incident(None, 42.24, -71.15),
            incident(None, 42.40, -71.00),
        ];

        let bounds = coordinate_bounds(&incidents).unwrap();
        assert!((bounds.min_latitude - 42.23).abs() < 1e-9);
        assert!((bounds.max_latitude - 42.41).abs() < 1e-9);
        assert!((bounds.min_longitude - -71.16).abs() < 1e-9);
        assert!((bounds.max_longitude - -70.99).abs() < 1e-9);
    }
}
