//! Correlation-id grouping of tsunami reports.

use std::collections::HashMap;

use quake_core::{
    TsunamiForecast, TsunamiForecastReport, TsunamiGrade, TsunamiObservation,
    TsunamiObservationReport,
};

/// Merge forecast reports by correlation id.
///
/// Coastal-area names are unioned per grade (first-seen order, no
/// duplicates). `highest` is the most severe grade that names at least one
/// area - an empty set at a higher grade is skipped.
pub fn group_forecasts(
    reports: &[TsunamiForecastReport],
) -> HashMap<String, TsunamiForecast> {
    let mut merged: HashMap<String, TsunamiForecast> = HashMap::new();

    for report in reports {
        let entry = merged.entry(report.correlation_id.clone()).or_default();
        for area in &report.areas {
            let Some(grade) = area.grade else { continue };
            let names = match grade {
                TsunamiGrade::MajorWarning => &mut entry.major_warning,
                TsunamiGrade::Warning => &mut entry.warning,
                TsunamiGrade::Advisory => &mut entry.advisory,
            };
            if !names.contains(&area.name) {
                names.push(area.name.clone());
            }
        }
    }

    for forecast in merged.values_mut() {
        forecast.highest = [
            TsunamiGrade::MajorWarning,
            TsunamiGrade::Warning,
            TsunamiGrade::Advisory,
        ]
        .into_iter()
        .find(|grade| !forecast.areas(*grade).is_empty());
    }

    merged
}

/// Merge observation reports by correlation id, dropping cancelled ones.
///
/// Stations flatten across areas in report order; `max_height` is the
/// maximum over every station that reported a height.
pub fn group_observations(
    reports: &[TsunamiObservationReport],
) -> HashMap<String, TsunamiObservation> {
    let mut merged: HashMap<String, TsunamiObservation> = HashMap::new();

    for report in reports.iter().filter(|r| !r.cancelled) {
        let entry = merged.entry(report.correlation_id.clone()).or_default();
        for area in &report.areas {
            for station in &area.stations {
                if let Some(height) = station.height {
                    entry.max_height =
                        Some(entry.max_height.map_or(height, |max: f64| max.max(height)));
                }
                entry.stations.push(station.clone());
            }
        }
    }

    merged
}
