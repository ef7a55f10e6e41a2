//! Duplicate detection module.
//!
//! - [`grouper`]: size pre-filter and content hashing into groups
//! - [`groups`]: the duplicate group type and grouping statistics
//! - [`selection`]: exclusion parsing and per-group link plans

pub mod grouper;
pub mod groups;
pub mod selection;

pub use grouper::{group_duplicates, GrouperConfig};
pub use groups::{DuplicateGroup, GroupStats};
pub use selection::{build_plans, ExclusionSet, GroupPlan, SelectionError};
