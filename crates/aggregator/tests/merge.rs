//! End-to-end aggregation scenarios over upstream-shaped JSON.

use std::time::Duration;

use aggregator::{aggregate, fetch_snapshot, PollSnapshot, DEFAULT_MIN_SCALE};
use quake_core::{
    async_trait, parse_reports, Intensity, RawReport, ReportKind, ReportSource,
    SourceError, TsunamiGrade,
};
use serde_json::{json, Value};

fn intensity_report(max_scale: i64, with_points: bool) -> Value {
    let points = if with_points {
        json!([
            {"pref": "宮城県", "addr": "栗原市築館", "scale": 70, "isArea": false},
            {"pref": "宮城県", "addr": "仙台市宮城野区", "scale": 60, "isArea": false}
        ])
    } else {
        json!([])
    };

    json!({
        "code": 551,
        "id": "upstream-1",
        "earthquake": {
            "time": "2011-03-11T14:46:00+09:00",
            "hypocenter": {"name": "三陸沖", "depth": 24.0, "magnitude": 9.0},
            "maxScale": max_scale,
            "domesticTsunami": "MajorWarning"
        },
        "points": points
    })
}

fn snapshot_from(values: Vec<Value>) -> PollSnapshot {
    PollSnapshot::from_reports(parse_reports(&values))
}

#[test]
fn test_correction_revisions_merge_in_either_order() {
    let detailed = intensity_report(70, true);
    let summary = intensity_report(60, false);

    for values in [
        vec![summary.clone(), detailed.clone()],
        vec![detailed, summary],
    ] {
        let events = aggregate(&snapshot_from(values), DEFAULT_MIN_SCALE);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.max_scale, Some(Intensity::Int7));
        // The populated point list wins regardless of arrival order, and
        // is exactly the detailed report's list.
        assert_eq!(event.points.len(), 2);
        assert_eq!(event.points[0].address, "栗原市築館");
    }
}

#[test]
fn test_event_id_stable_across_polls() {
    let first = aggregate(
        &snapshot_from(vec![intensity_report(60, false)]),
        DEFAULT_MIN_SCALE,
    );
    let second = aggregate(
        &snapshot_from(vec![intensity_report(70, true)]),
        DEFAULT_MIN_SCALE,
    );

    // Same physical earthquake, different revisions on different polls:
    // the content-derived id matches.
    assert_eq!(first[0].id, second[0].id);
}

#[test]
fn test_tsunami_context_joined_by_correlation_id() {
    let values = vec![
        intensity_report(70, true),
        json!({
            "code": 552,
            "id": "upstream-1",
            "areas": [
                {"grade": "MajorWarning", "name": "岩手県"},
                {"grade": "Warning", "name": "青森県太平洋沿岸"}
            ]
        }),
        json!({
            "code": 556,
            "id": "upstream-1",
            "cancelled": false,
            "areas": [
                {"name": "岩手県", "stations": [
                    {"name": "釜石", "time": "2011-03-11T15:21:00+09:00", "height": 4.2}
                ]}
            ]
        }),
        // Context for an unrelated correlation id must not attach.
        json!({
            "code": 552,
            "id": "upstream-9",
            "areas": [{"grade": "Advisory", "name": "北海道太平洋沿岸"}]
        }),
    ];

    let events = aggregate(&snapshot_from(values), DEFAULT_MIN_SCALE);
    assert_eq!(events.len(), 1);

    let forecast = events[0].forecast.as_ref().unwrap();
    assert_eq!(forecast.highest, Some(TsunamiGrade::MajorWarning));
    assert_eq!(forecast.major_warning, vec!["岩手県".to_string()]);
    assert!(!forecast.advisory.contains(&"北海道太平洋沿岸".to_string()));

    let observation = events[0].observation.as_ref().unwrap();
    assert_eq!(observation.max_height, Some(4.2));
    assert_eq!(observation.stations[0].name, "釜石");
}

/// Report source that fails for a chosen subset of kinds.
struct PartialSource {
    failing: Vec<ReportKind>,
}

#[async_trait]
impl ReportSource for PartialSource {
    async fn fetch(&self, kind: ReportKind) -> Result<Vec<RawReport>, SourceError> {
        if self.failing.contains(&kind) {
            return Err(SourceError::Status(503));
        }
        let values = match kind {
            ReportKind::Intensity => vec![intensity_report(60, true)],
            ReportKind::TsunamiForecast => vec![json!({
                "code": 552,
                "id": "upstream-1",
                "areas": [{"grade": "Warning", "name": "岩手県"}]
            })],
            _ => Vec::new(),
        };
        Ok(parse_reports(&values))
    }
}

#[tokio::test]
async fn test_partial_source_failure_degrades() {
    let source = PartialSource {
        failing: vec![ReportKind::TsunamiObservation],
    };

    let snapshot = fetch_snapshot(&source, Duration::from_secs(1)).await;
    let events = aggregate(&snapshot, DEFAULT_MIN_SCALE);

    // Intensity and forecast data still produce events; the failed kind
    // just leaves its context absent.
    assert_eq!(events.len(), 1);
    assert!(events[0].forecast.is_some());
    assert!(events[0].observation.is_none());
}

#[tokio::test]
async fn test_all_sources_failing_yields_empty_snapshot() {
    let source = PartialSource {
        failing: ReportKind::ALL.to_vec(),
    };

    let snapshot = fetch_snapshot(&source, Duration::from_secs(1)).await;
    assert!(snapshot.is_empty());
    assert!(aggregate(&snapshot, DEFAULT_MIN_SCALE).is_empty());
}
