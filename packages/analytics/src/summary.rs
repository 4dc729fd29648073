//! Run summary assembly.

use proximity_map_analytics_models::{CategoryCount, RunSummary};
use proximity_map_incident_models::{ProximityCategory, ProximityIncident};

/// Builds the end-of-run report from the classified collection.
///
/// Every category appears in the summary (zero counts included) so that
/// consumers can render a fixed-width table without probing for gaps.
#[must_use]
pub fn summarize(raw_count: usize, incidents: &[ProximityIncident]) -> RunSummary {
    let categories = ProximityCategory::all()
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: incidents
                .iter()
                .filter(|record| record.category == category)
                .count() as u64,
        })
        .collect();

    RunSummary {
        raw_count: raw_count as u64,
        clean_count: incidents.len() as u64,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone as _, Utc};
    use proximity_map_incident_models::{CleanIncident, ProximityBreakpoints};

    use super::*;

    fn classified(distance: f64) -> ProximityIncident {
        let naive = NaiveDate::from_ymd_opt(2022, 2, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        ProximityIncident {
            incident: CleanIncident {
                occurred_at: Utc.from_utc_datetime(&naive),
                year: 2022,
                latitude: 42.33,
                longitude: -71.08,
                area: None,
                weapon: None,
            },
            distance,
            category: ProximityCategory::from_distance(distance, ProximityBreakpoints::default()),
        }
    }

    #[test]
    fn counts_every_category_including_empty_ones() {
        let incidents = vec![classified(0.01), classified(0.03), classified(0.01)];
        let summary = summarize(7, &incidents);

        assert_eq!(summary.raw_count, 7);
        assert_eq!(summary.clean_count, 3);
        assert_eq!(summary.categories.len(), 3);
        assert_eq!(summary.categories[0].category, ProximityCategory::Close);
        assert_eq!(summary.categories[0].count, 2);
        assert_eq!(summary.categories[1].count, 1);
        assert_eq!(summary.categories[2].count, 0);
    }

    #[test]
    fn empty_run_is_not_an_error() {
        let summary = summarize(0, &[]);
        assert_eq!(summary.clean_count, 0);
        assert!(summary.categories.iter().all(|c| c.count == 0));
    }
}
