//! Proximity classification: distance to the downtown reference point.

use proximity_map_incident_models::{
    CleanIncident, Coordinate, ProximityBreakpoints, ProximityCategory, ProximityIncident,
};

/// Euclidean distance in coordinate-degree units between an incident and
/// the reference point.
///
/// Deliberately not geodesic: the buckets were calibrated against plain
/// degree-space distances, so this is only meaningful for comparing
/// incidents within one city, never across latitudes.
#[must_use]
pub fn degree_distance(latitude: f64, longitude: f64, reference: Coordinate) -> f64 {
    ((latitude - reference.latitude).powi(2) + (longitude - reference.longitude).powi(2)).sqrt()
}

/// Classifies cleaned incidents by proximity to `reference`.
///
/// Pure function of the inputs: no side effects, deterministic, input
/// order preserved.
#[must_use]
pub fn classify(
    incidents: Vec<CleanIncident>,
    reference: Coordinate,
    breakpoints: ProximityBreakpoints,
) -> Vec<ProximityIncident> {
    incidents
        .into_iter()
        .map(|incident| {
            let distance = degree_distance(incident.latitude, incident.longitude, reference);
            let category = ProximityCategory::from_distance(distance, breakpoints);
            ProximityIncident {
                incident,
                distance,
                category,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone as _, Utc};

    use super::*;

    const DOWNTOWN_LA: Coordinate = Coordinate {
        latitude: 34.0522,
        longitude: -118.2437,
    };

    fn incident(latitude: f64, longitude: f64) -> CleanIncident {
        let naive = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CleanIncident {
            occurred_at: Utc.from_utc_datetime(&naive),
            year: 2021,
            latitude,
            longitude,
            area: None,
            weapon: None,
        }
    }

    #[test]
    fn downtown_la_incident_is_close() {
        let classified = classify(
            vec![incident(34.05, -118.25)],
            DOWNTOWN_LA,
            ProximityBreakpoints::default(),
        );

        assert_eq!(classified.len(), 1);
        let expected = (0.0522_f64 - 0.05).powi(2) + (0.25_f64 - 0.2437).powi(2);
        assert!((classified[0].distance - expected.sqrt()).abs() < 1e-9);
        assert!(classified[0].distance < 0.02);
        assert_eq!(classified[0].category, ProximityCategory::Close);
    }

    #[test]
    fn classification_is_deterministic() {
        let incidents = vec![
            incident(34.05, -118.25),
            incident(34.10, -118.30),
            incident(34.30, -118.60),
        ];

        let first = classify(
            incidents.clone(),
            DOWNTOWN_LA,
            ProximityBreakpoints::default(),
        );
        let second = classify(incidents, DOWNTOWN_LA, ProximityBreakpoints::default());
        assert_eq!(first, second);
    }

    #[test]
    fn distance_zero_at_the_reference_point() {
        let d = degree_distance(
            DOWNTOWN_LA.latitude,
            DOWNTOWN_LA.longitude,
            DOWNTOWN_LA,
        );
        assert!(d.abs() < f64::EPSILON);
    }

    #[test]
    fn category_never_decreases_with_distance() {
        let origin = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
        let incidents: Vec<CleanIncident> = (1..=100)
            .map(|i| incident(f64::from(i) * 0.001, 0.0))
            .collect();

        let classified = classify(incidents, origin, ProximityBreakpoints::default());
        for pair in classified.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
            assert!(pair[0].category <= pair[1].category);
        }
    }

    #[test]
    fn exact_breakpoints_round_up() {
        let origin = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
        let classified = classify(
            vec![incident(0.02, 0.0), incident(0.05, 0.0)],
            origin,
            ProximityBreakpoints::default(),
        );

        assert_eq!(classified[0].category, ProximityCategory::Medium);
        assert_eq!(classified[1].category, ProximityCategory::Far);
    }

    #[test]
    fn custom_breakpoints_shift_the_buckets() {
        let origin = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
        };
        let classified = classify(
            vec![incident(0.03, 0.0)],
            origin,
            ProximityBreakpoints::new(0.04, 0.08),
        );
        assert_eq!(classified[0].category, ProximityCategory::Close);
    }
}
