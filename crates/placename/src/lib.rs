//! Place-name readings and municipality resolution.
//!
//! This crate owns the two address-handling pieces of the pipeline:
//!
//! - [`KanaDict`] - place name → hiragana reading, built once from the
//!   administrative reference dataset, with a user-editable override table
//!   that takes precedence
//! - [`resolve`] - the ordered-rule heuristic that maps a raw observation
//!   address to its canonical `"{prefecture}_{municipality}"` key
//! - [`FileOverrideStore`] - JSON-file persistence for the override table

pub mod dict;
pub mod kana;
pub mod resolver;
pub mod store;

pub use dict::KanaDict;
pub use kana::katakana_to_hiragana;
pub use resolver::resolve;
pub use store::FileOverrideStore;
