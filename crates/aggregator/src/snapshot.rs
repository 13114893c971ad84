//! One poll's worth of upstream reports.

use std::time::Duration;

use quake_core::{
    EarlyWarningReport, IntensityReport, RawReport, ReportKind, ReportSource,
    TsunamiForecastReport, TsunamiObservationReport,
};
use tracing::warn;

/// The reports fetched in one polling cycle, partitioned by kind.
#[derive(Debug, Clone, Default)]
pub struct PollSnapshot {
    pub intensity: Vec<IntensityReport>,
    pub forecasts: Vec<TsunamiForecastReport>,
    pub observations: Vec<TsunamiObservationReport>,
    pub warnings: Vec<EarlyWarningReport>,
}

impl PollSnapshot {
    /// Partition a mixed report stream, preserving fetch order per kind.
    pub fn from_reports<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = RawReport>,
    {
        let mut snapshot = Self::default();
        for report in reports {
            match report {
                RawReport::Intensity(r) => snapshot.intensity.push(r),
                RawReport::TsunamiForecast(r) => snapshot.forecasts.push(r),
                RawReport::TsunamiObservation(r) => snapshot.observations.push(r),
                RawReport::EarlyWarning(r) => snapshot.warnings.push(r),
            }
        }
        snapshot
    }

    /// True when every kind came back empty (all fetches failed or the
    /// upstream had nothing) - the caller shows an explicit no-data state.
    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
            && self.forecasts.is_empty()
            && self.observations.is_empty()
            && self.warnings.is_empty()
    }
}

/// Fetch all four report kinds concurrently.
///
/// Each fetch is wrapped in its own timeout and degrades to an empty list
/// on failure, so any subset of the kinds may be absent from the snapshot
/// without aborting the poll.
pub async fn fetch_snapshot(source: &dyn ReportSource, timeout: Duration) -> PollSnapshot {
    let (intensity, forecasts, observations, warnings) = tokio::join!(
        fetch_kind(source, ReportKind::Intensity, timeout),
        fetch_kind(source, ReportKind::TsunamiForecast, timeout),
        fetch_kind(source, ReportKind::TsunamiObservation, timeout),
        fetch_kind(source, ReportKind::EarlyWarning, timeout),
    );

    PollSnapshot::from_reports(
        intensity
            .into_iter()
            .chain(forecasts)
            .chain(observations)
            .chain(warnings),
    )
}

async fn fetch_kind(
    source: &dyn ReportSource,
    kind: ReportKind,
    timeout: Duration,
) -> Vec<RawReport> {
    match tokio::time::timeout(timeout, source.fetch(kind)).await {
        Ok(Ok(reports)) => reports,
        Ok(Err(err)) => {
            warn!(kind = ?kind, error = %err, "report fetch failed");
            Vec::new()
        }
        Err(_) => {
            warn!(kind = ?kind, timeout = ?timeout, "report fetch timed out");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_core::TsunamiStatus;

    #[test]
    fn test_partition_preserves_order() {
        let reports = vec![
            RawReport::Intensity(IntensityReport {
                correlation_id: "a".to_string(),
                time: "t1".to_string(),
                epicenter: None,
                depth: None,
                magnitude: None,
                max_scale: None,
                tsunami: TsunamiStatus::Unknown,
                points: Vec::new(),
            }),
            RawReport::TsunamiForecast(TsunamiForecastReport {
                correlation_id: "b".to_string(),
                areas: Vec::new(),
            }),
            RawReport::Intensity(IntensityReport {
                correlation_id: "c".to_string(),
                time: "t2".to_string(),
                epicenter: None,
                depth: None,
                magnitude: None,
                max_scale: None,
                tsunami: TsunamiStatus::Unknown,
                points: Vec::new(),
            }),
        ];

        let snapshot = PollSnapshot::from_reports(reports);
        assert_eq!(snapshot.intensity.len(), 2);
        assert_eq!(snapshot.intensity[0].correlation_id, "a");
        assert_eq!(snapshot.intensity[1].correlation_id, "c");
        assert_eq!(snapshot.forecasts.len(), 1);
        assert!(snapshot.observations.is_empty());
        assert!(!snapshot.is_empty());
        assert!(PollSnapshot::default().is_empty());
    }
}
