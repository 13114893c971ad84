//! Namazu ticker server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use placename::dict::KanaDict;
use placename::store::FileOverrideStore;
use quake_core::{OverrideStore, PlaceNameSource};
use quake_feed::FeedClient;
use tokio::sync::broadcast;
use tracing::{info, warn};

mod config;
mod display;
mod playback;
mod poll;
mod server;
mod state;

use config::TickerConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = TickerConfig::from_env();
    let client = FeedClient::new(config.feed.clone()).expect("failed to build HTTP client");

    // The dictionary is built once per session. A failed dataset fetch is
    // not fatal: readings degrade to blank.
    let mut dict = match client.fetch_administrative_names().await {
        Ok(tiers) => {
            let dict = KanaDict::from_tiers(&tiers);
            info!(entries = dict.len(), "place-name dictionary loaded");
            dict
        }
        Err(err) => {
            warn!(error = %err, "place-name dataset unavailable, readings degrade to blank");
            KanaDict::new()
        }
    };

    let store = FileOverrideStore::new(&config.override_path);
    match store.load() {
        Ok(overrides) => {
            if !overrides.is_empty() {
                info!(entries = overrides.len(), "reading overrides loaded");
            }
            dict.set_overrides(overrides);
        }
        Err(err) => warn!(error = %err, "override store unavailable"),
    }

    let (tx, _rx) = broadcast::channel(64);
    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(client),
        Arc::new(store),
        dict,
        tx,
    ));

    tokio::spawn(poll::poll_loop(state.clone()));
    tokio::spawn(poll::playback_loop(state.clone()));

    let app = server::create_router(state);
    let addr: SocketAddr = config.bind_addr.parse().expect("invalid NAMAZU_ADDR");
    info!(%addr, "Namazu ticker listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
