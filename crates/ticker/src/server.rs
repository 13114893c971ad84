//! The HTTP surface: SSE stream, current events, manual refresh and
//! playback control.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::display::TickerFrame;
use crate::playback::{Playback, PlaybackInput};
use crate::poll::{broadcast_frame, run_poll};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/stream", get(stream_handler))
        .route("/events", get(events_handler))
        .route("/refresh", post(refresh_handler))
        .route("/playback/start", post(playback_start_handler))
        .route("/playback/next", post(playback_next_handler))
        .route("/playback/prev", post(playback_prev_handler))
        .route("/playback/stop", post(playback_stop_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = state.tx.subscribe();
    let stream = BroadcastStream::new(rx)
        .filter_map(|message| message.ok())
        .map(|json| Ok(SseEvent::default().data(json)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn events_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let events = state.events.read().await.clone();
    Json(serde_json::json!({ "events": events.as_ref() }))
}

async fn refresh_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    run_poll(&state).await;
    StatusCode::NO_CONTENT
}

async fn health_handler() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct PlaybackStatus {
    state: &'static str,
    page: usize,
    total: usize,
}

fn status_of(playback: &Playback) -> PlaybackStatus {
    PlaybackStatus {
        state: playback.state().name(),
        page: playback.page(),
        total: playback.total(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct StartParams {
    /// Event id to play; defaults to the first card.
    event: Option<String>,
}

async fn playback_start_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StartParams>,
) -> Json<PlaybackStatus> {
    let cards = state.cards.read().await.clone();
    let card = match &params.event {
        Some(id) => cards.iter().find(|card| &card.id == id),
        None => cards.first(),
    };
    let total = card.map(|card| card.pages.len()).unwrap_or(0);

    let mut playback = state.playback.lock().await;
    playback.start(total);
    announce(&state, &playback);
    Json(status_of(&playback))
}

async fn playback_input(state: &Arc<AppState>, input: PlaybackInput) -> Json<PlaybackStatus> {
    let mut playback = state.playback.lock().await;
    playback.apply(input);
    announce(state, &playback);
    Json(status_of(&playback))
}

async fn playback_next_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    playback_input(&state, PlaybackInput::Next).await
}

async fn playback_prev_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    playback_input(&state, PlaybackInput::Prev).await
}

async fn playback_stop_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    playback_input(&state, PlaybackInput::Stop).await
}

fn announce(state: &AppState, playback: &Playback) {
    broadcast_frame(
        state,
        &TickerFrame::Playback {
            state: playback.state().name().to_string(),
            page: playback.page(),
            total: playback.total(),
        },
    );
}

/// Minimal shell: subscribes to the frame stream and renders the current
/// card. The frames carry everything; this page is deliberately thin.
const INDEX_HTML: &str = r#"<!doctype html>
<html lang="ja">
<head>
<meta charset="utf-8">
<title>Namazu</title>
<style>
  body { font-family: sans-serif; background: #111; color: #eee; margin: 2rem; }
  #ticker { font-size: 1.4rem; line-height: 1.6; min-height: 4rem; }
  #banner { color: #f66; }
  .heading { color: #fc3; margin-right: 1rem; }
  .pageno { color: #888; font-size: 0.9rem; }
</style>
</head>
<body>
<h1>Namazu 地震情報ティッカー</h1>
<div id="banner"></div>
<div id="ticker">接続中…</div>
<script>
  const ticker = document.getElementById("ticker");
  const banner = document.getElementById("banner");
  const source = new EventSource("/stream");
  let cards = [];
  source.onmessage = (msg) => {
    const frame = JSON.parse(msg.data);
    if (frame.kind === "no_data") {
      banner.textContent = frame.message;
      ticker.textContent = "";
    } else if (frame.kind === "events") {
      banner.textContent = "";
      cards = frame.cards;
      render(cards[0], 0);
    } else if (frame.kind === "alert") {
      banner.textContent = "緊急地震速報: " + (frame.card.hypocenter || "") +
        " " + (frame.card.max_scale || "");
    } else if (frame.kind === "playback" && cards.length > 0) {
      render(cards[0], frame.page - 1);
    }
  };
  function render(card, pageIdx) {
    if (!card) { ticker.textContent = ""; return; }
    const page = card.pages[pageIdx];
    if (!page) { ticker.textContent = card.epicenter + " " + (card.max_scale || ""); return; }
    ticker.innerHTML =
      '<span class="heading">' + page.heading + '</span>' +
      page.items.join("　") +
      ' <span class="pageno">' + page.index + "/" + page.total + "</span>";
  }
</script>
</body>
</html>
"#;
