//! The early-warning side channel.

use std::cmp::Ordering;
use std::collections::HashSet;

use quake_core::EarlyWarningReport;
use rand::Rng;

/// Pick the early warning to surface for this poll.
///
/// Normally the most recent report wins, comparing the upstream ISO-8601
/// time strings (which sort chronologically) and falling back to input
/// order when a time is missing. In simulation mode a random candidate is
/// chosen instead, to exercise the alert path with varied payloads.
pub fn select_warning(
    reports: &[EarlyWarningReport],
    simulate: bool,
) -> Option<&EarlyWarningReport> {
    if reports.is_empty() {
        return None;
    }

    if simulate {
        let index = rand::thread_rng().gen_range(0..reports.len());
        return reports.get(index);
    }

    reports
        .iter()
        .enumerate()
        .max_by(|(left_idx, left), (right_idx, right)| {
            match (&left.time, &right.time) {
                (Some(lt), Some(rt)) => lt.cmp(rt).then(left_idx.cmp(right_idx)),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => left_idx.cmp(right_idx),
            }
        })
        .map(|(_, report)| report)
}

/// Suppresses duplicate alert delivery per correlation id.
///
/// An id stays active from the first `admit` until `resolve`, so repeated
/// polls seeing the same warning do not re-fire the alert while it is
/// still showing.
#[derive(Debug, Default)]
pub struct AlertGate {
    active: HashSet<String>,
}

impl AlertGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the id was not already active - the caller
    /// should deliver the alert. Subsequent calls for the same id return
    /// false until it is resolved.
    pub fn admit(&mut self, correlation_id: &str) -> bool {
        self.active.insert(correlation_id.to_string())
    }

    /// End the alert window for an id, allowing a future re-delivery.
    pub fn resolve(&mut self, correlation_id: &str) {
        self.active.remove(correlation_id);
    }

    /// Resolve every active id the predicate no longer considers live.
    ///
    /// The poll loop calls this with the warning ids still present in the
    /// current snapshot: an id that has left the feed ends its window, so
    /// a later reappearance alerts again.
    pub fn prune<F>(&mut self, live: F)
    where
        F: Fn(&str) -> bool,
    {
        self.active.retain(|id| live(id));
    }

    pub fn is_active(&self, correlation_id: &str) -> bool {
        self.active.contains(correlation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_core::TsunamiStatus;

    fn warning(id: &str, time: Option<&str>) -> EarlyWarningReport {
        EarlyWarningReport {
            correlation_id: id.to_string(),
            time: time.map(|t| t.to_string()),
            hypocenter: None,
            max_scale: None,
            magnitude: None,
            tsunami: TsunamiStatus::Unknown,
        }
    }

    #[test]
    fn test_select_most_recent() {
        let reports = vec![
            warning("a", Some("2024-01-01T16:10:09+09:00")),
            warning("b", Some("2024-01-01T16:12:31+09:00")),
            warning("c", Some("2024-01-01T16:11:00+09:00")),
        ];
        let selected = select_warning(&reports, false).unwrap();
        assert_eq!(selected.correlation_id, "b");
    }

    #[test]
    fn test_select_falls_back_to_input_order() {
        let reports = vec![warning("a", None), warning("b", None)];
        let selected = select_warning(&reports, false).unwrap();
        assert_eq!(selected.correlation_id, "b");
    }

    #[test]
    fn test_timed_report_beats_untimed() {
        let reports = vec![
            warning("late", None),
            warning("timed", Some("2024-01-01T00:00:00+09:00")),
        ];
        let selected = select_warning(&reports, false).unwrap();
        assert_eq!(selected.correlation_id, "timed");
    }

    #[test]
    fn test_select_empty() {
        assert!(select_warning(&[], false).is_none());
        assert!(select_warning(&[], true).is_none());
    }

    #[test]
    fn test_simulation_picks_some_candidate() {
        let reports = vec![warning("a", None), warning("b", None)];
        let selected = select_warning(&reports, true).unwrap();
        assert!(["a", "b"].contains(&selected.correlation_id.as_str()));
    }

    #[test]
    fn test_alert_gate_suppresses_duplicates() {
        let mut gate = AlertGate::new();
        assert!(gate.admit("eew-1"));
        assert!(!gate.admit("eew-1"));
        assert!(gate.is_active("eew-1"));

        // A different id is independent.
        assert!(gate.admit("eew-2"));

        gate.resolve("eew-1");
        assert!(!gate.is_active("eew-1"));
        assert!(gate.admit("eew-1"));
    }

    #[test]
    fn test_alert_gate_prune() {
        let mut gate = AlertGate::new();
        gate.admit("eew-1");
        gate.admit("eew-2");

        // eew-1 is still in the feed, eew-2 has left it.
        gate.prune(|id| id == "eew-1");

        assert!(gate.is_active("eew-1"));
        assert!(!gate.is_active("eew-2"));
        assert!(!gate.admit("eew-1"));
        assert!(gate.admit("eew-2"));
    }
}
