//! HTTP access to the upstream earthquake API and the administrative
//! place-name reference dataset.
//!
//! This crate implements the [`quake_core::ReportSource`] and
//! [`quake_core::PlaceNameSource`] traits over HTTP. Each report kind is
//! fetched independently so one failing endpoint never takes down a poll.
//!
//! # Example
//!
//! ```no_run
//! use quake_core::{ReportKind, ReportSource};
//! use quake_feed::{FeedClient, FeedConfig};
//!
//! # async fn example() -> Result<(), quake_feed::FeedError> {
//! let client = FeedClient::new(FeedConfig::default())?;
//! let _reports = client.fetch(ReportKind::Intensity).await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::FeedClient;
pub use config::FeedConfig;
pub use error::FeedError;
