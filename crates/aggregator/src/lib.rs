//! Report correlation and event merging.
//!
//! One poll flows through this crate in three steps:
//!
//! 1. [`fetch_snapshot`] - fetch the four report kinds concurrently, each
//!    with its own timeout; any subset may fail without affecting the rest
//! 2. [`aggregate`] - deduplicate intensity reports into canonical
//!    [`quake_core::Event`] records and attach tsunami context by
//!    correlation id
//! 3. [`select_warning`] / [`AlertGate`] - surface the early-warning side
//!    channel, suppressing duplicate alerts per correlation id
//!
//! Everything after the fetch is pure: given the same [`PollSnapshot`],
//! `aggregate` produces the same events, in the same order, with the same
//! stable ids.

pub mod merge;
pub mod snapshot;
pub mod tsunami;
pub mod warning;

pub use merge::{aggregate, DEFAULT_MIN_SCALE};
pub use snapshot::{fetch_snapshot, PollSnapshot};
pub use tsunami::{group_forecasts, group_observations};
pub use warning::{select_warning, AlertGate};
