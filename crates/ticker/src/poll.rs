//! The polling loops.

use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use aggregator::{aggregate, fetch_snapshot, select_warning};
use pagination::ColumnProbe;
use tracing::{debug, info, warn};

use crate::display::{build_cards, TickerFrame};
use crate::playback::{PlaybackInput, PlaybackState};
use crate::state::AppState;

/// Periodic poll driver. Suspended while playback is engaged so the
/// displayed content is not replaced under an active slideshow.
pub async fn poll_loop(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(state.config.poll_interval);
    loop {
        interval.tick().await;
        if state.playback.lock().await.is_engaged() {
            debug!("playback active, poll suspended");
            continue;
        }
        run_poll(&state).await;
    }
}

/// Autoplay driver: one playback tick per page interval.
pub async fn playback_loop(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(state.config.page_interval);
    loop {
        interval.tick().await;
        let mut playback = state.playback.lock().await;
        if playback.state() != PlaybackState::Playing {
            continue;
        }
        let next = playback.apply(PlaybackInput::Tick);
        let frame = TickerFrame::Playback {
            state: next.name().to_string(),
            page: playback.page(),
            total: playback.total(),
        };
        drop(playback);
        broadcast_frame(&state, &frame);
    }
}

/// Run one poll if none is in flight.
///
/// The in-flight flag is taken before the fetches and released only after
/// the new state is installed, so the timer and a manual refresh can never
/// interleave their writes.
pub async fn run_poll(state: &AppState) {
    if state
        .in_flight
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        debug!("poll already in flight");
        return;
    }

    poll_once(state).await;

    state.in_flight.store(false, Ordering::SeqCst);
}

async fn poll_once(state: &AppState) {
    let snapshot = fetch_snapshot(state.source.as_ref(), state.config.feed.timeout).await;

    // Early warnings bypass aggregation entirely; the gate keeps an id
    // from re-firing while its alert is still active, and an id that has
    // left the feed ends its window.
    {
        let mut alerts = state.alerts.lock().await;
        alerts.prune(|id| {
            snapshot
                .warnings
                .iter()
                .any(|warning| warning.correlation_id == id)
        });
        if let Some(warning) = select_warning(&snapshot.warnings, state.config.simulate) {
            if alerts.admit(&warning.correlation_id) {
                info!(id = %warning.correlation_id, "delivering early warning");
                state.alert_sink.notify(warning);
            }
        }
    }

    let events = aggregate(&snapshot, state.config.min_scale);
    info!(
        reports = snapshot.intensity.len(),
        events = events.len(),
        "poll aggregated"
    );

    let new_event = {
        let mut known = state.known_ids.lock().await;
        let ids: HashSet<String> = events.iter().map(|event| event.id.clone()).collect();
        // The very first poll seeds the id set without flagging anything
        // as new.
        let fresh = !known.is_empty() && ids.iter().any(|id| !known.contains(id));
        *known = ids;
        fresh
    };

    let frame = if events.is_empty() {
        *state.cards.write().await = Arc::new(Vec::new());
        TickerFrame::no_data(snapshot.is_empty())
    } else {
        let probe = ColumnProbe::new(state.config.columns);
        let mut dict = state.dict.write().await;
        let (cards, missing) = build_cards(&events, state.config.naming, &dict, &probe);

        // Names with no reading become empty-placeholder overrides so a
        // curator can fill them in later.
        if !missing.is_empty() {
            let added = dict.propose_missing(missing);
            if !added.is_empty() {
                debug!(count = added.len(), "proposed reading overrides");
                if let Err(err) = state.store.save(dict.overrides()) {
                    warn!(error = %err, "failed to persist override proposals");
                }
            }
        }
        drop(dict);

        *state.cards.write().await = Arc::new(cards.clone());
        TickerFrame::Events { new_event, cards }
    };

    *state.events.write().await = Arc::new(events);
    broadcast_frame(state, &frame);
}

/// Encode and fan a frame out to the SSE subscribers. A send with no
/// receivers is not an error - nobody is watching yet.
pub fn broadcast_frame(state: &AppState, frame: &TickerFrame) {
    match serde_json::to_string(frame) {
        Ok(json) => {
            let _ = state.tx.send(json);
        }
        Err(err) => warn!(error = %err, "failed to encode frame"),
    }
}
