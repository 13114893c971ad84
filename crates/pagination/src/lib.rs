//! Fixed-budget page splitting.
//!
//! Splits an ordered list of display strings into pages that each fit a
//! two-line rendering surface, without ever splitting one string across
//! pages and without reordering anything. Sorting (for example by
//! descending intensity) happens before pagination, never inside it.

pub mod page;
pub mod probe;

pub use page::{paginate, Page};
pub use probe::{ColumnProbe, SurfaceProbe};
