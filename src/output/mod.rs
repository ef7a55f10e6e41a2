//! Output formatters for duplicate scan results.
//!
//! - [`terminal`]: per-group listings, running totals, final summary
//! - [`report`]: banner-framed text report written instead of linking

pub mod report;
pub mod terminal;
