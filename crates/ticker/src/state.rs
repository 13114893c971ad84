//! Shared application state.
//!
//! The poll loop is the single writer. Everything readers see is swapped
//! whole (`Arc` replacement), never mutated in place, so an SSE handler or
//! playback endpoint can never observe a half-updated poll.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use aggregator::AlertGate;
use placename::dict::KanaDict;
use quake_core::{AlertSink, EarlyWarningReport, Event, OverrideStore, ReportSource};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::warn;

use crate::config::TickerConfig;
use crate::display::{EventCard, TickerFrame};
use crate::playback::Playback;

/// Alert delivery over the SSE frame stream.
///
/// Fire-and-forget: an encode failure is logged and dropped, and a send
/// with no subscribers just means nobody is watching yet.
pub struct SseAlertSink {
    tx: broadcast::Sender<String>,
}

impl SseAlertSink {
    pub fn new(tx: broadcast::Sender<String>) -> Self {
        Self { tx }
    }
}

impl AlertSink for SseAlertSink {
    fn notify(&self, warning: &EarlyWarningReport) {
        match serde_json::to_string(&TickerFrame::alert(warning)) {
            Ok(json) => {
                let _ = self.tx.send(json);
            }
            Err(err) => warn!(error = %err, "failed to encode alert frame"),
        }
    }
}

pub struct AppState {
    pub config: TickerConfig,
    pub source: Arc<dyn ReportSource>,
    pub store: Arc<dyn OverrideStore>,
    pub alert_sink: Arc<dyn AlertSink>,
    /// Current events, replaced atomically after each poll.
    pub events: RwLock<Arc<Vec<Event>>>,
    /// Display cards backing the playback endpoints.
    pub cards: RwLock<Arc<Vec<EventCard>>>,
    /// Event ids seen on the previous poll, for new-event detection.
    pub known_ids: Mutex<HashSet<String>>,
    /// Set while a poll runs; the timer and manual refresh share it so two
    /// refreshes never execute concurrently.
    pub in_flight: AtomicBool,
    pub playback: Mutex<Playback>,
    pub alerts: Mutex<AlertGate>,
    pub dict: RwLock<KanaDict>,
    /// Frame fan-out to SSE clients.
    pub tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(
        config: TickerConfig,
        source: Arc<dyn ReportSource>,
        store: Arc<dyn OverrideStore>,
        dict: KanaDict,
        tx: broadcast::Sender<String>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            alert_sink: Arc::new(SseAlertSink::new(tx.clone())),
            events: RwLock::new(Arc::new(Vec::new())),
            cards: RwLock::new(Arc::new(Vec::new())),
            known_ids: Mutex::new(HashSet::new()),
            in_flight: AtomicBool::new(false),
            playback: Mutex::new(Playback::idle()),
            alerts: Mutex::new(AlertGate::new()),
            dict: RwLock::new(dict),
            tx,
        }
    }
}
