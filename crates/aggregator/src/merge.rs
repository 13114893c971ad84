//! Deduplication of intensity reports into canonical events.

use indexmap::IndexMap;

use quake_core::{event_id, Event, Intensity, IntensityReport};
use tracing::{debug, trace};

use crate::snapshot::PollSnapshot;
use crate::tsunami::{group_forecasts, group_observations};

/// Minimum intensity for an event to be listed.
pub const DEFAULT_MIN_SCALE: Intensity = Intensity::Int3;

/// Merge one poll's snapshot into the deduplicated event list.
///
/// The merge key is `(time, epicenter)` and nothing else: the upstream
/// event id is reused inconsistently across correction revisions, so it
/// only serves to join tsunami context afterwards. Reports iterate in
/// fetch order; the first occurrence of a key seeds the event and later
/// occurrences fold in per the merge rules. Event order is the fetch
/// order of first occurrences.
pub fn aggregate(snapshot: &PollSnapshot, min_scale: Intensity) -> Vec<Event> {
    let forecasts = group_forecasts(&snapshot.forecasts);
    let observations = group_observations(&snapshot.observations);

    let mut merged: IndexMap<(String, String), Event> = IndexMap::new();

    for report in &snapshot.intensity {
        // Below-threshold and unscaled reports are not listed.
        let Some(scale) = report.max_scale else {
            continue;
        };
        if scale < min_scale {
            continue;
        }

        // Missing correlation fields make a report unmergeable; skip it
        // without affecting the rest of the poll.
        let Some(epicenter) = report.epicenter.clone() else {
            debug!(id = %report.correlation_id, "skipping report without epicenter");
            continue;
        };
        if report.time.is_empty() {
            debug!(id = %report.correlation_id, "skipping report without event time");
            continue;
        }

        let key = (report.time.clone(), epicenter.clone());
        if let Some(event) = merged.get_mut(&key) {
            merge_into(event, report);
        } else {
            merged.insert(key, seed_event(report, epicenter));
        }
    }

    let mut events: Vec<Event> = merged.into_values().collect();
    for event in &mut events {
        event.forecast = forecasts.get(&event.correlation_id).cloned();
        event.observation = observations.get(&event.correlation_id).cloned();
    }

    events
}

fn seed_event(report: &IntensityReport, epicenter: String) -> Event {
    Event {
        id: event_id(&report.time, &epicenter),
        correlation_id: report.correlation_id.clone(),
        time: report.time.clone(),
        epicenter,
        depth: report.depth,
        magnitude: report.magnitude,
        max_scale: report.max_scale,
        tsunami: report.tsunami,
        forecast: None,
        observation: None,
        points: report.points.clone(),
    }
}

/// Fold a same-key report into an existing event.
///
/// Points replace wholesale, never merge: a correction revision either
/// carries the full point list or none, and a union of two revisions
/// would mix inconsistent coverage. Magnitude fills in only when missing,
/// the maximum intensity only ever rises, and the tsunami status takes
/// the incoming value (reports arrive in approximate chronological order
/// within one poll, so last write approximates most recent).
fn merge_into(event: &mut Event, incoming: &IntensityReport) {
    if event.points.is_empty() && !incoming.points.is_empty() {
        trace!(id = %event.id, points = incoming.points.len(), "adopting point list");
        event.points = incoming.points.clone();
    }

    if event.magnitude.is_none() {
        if let Some(magnitude) = incoming.magnitude {
            event.magnitude = Some(magnitude);
        }
    }

    if incoming.max_scale > event.max_scale {
        event.max_scale = incoming.max_scale;
    }

    if incoming.tsunami != event.tsunami {
        event.tsunami = incoming.tsunami;
    }
}
