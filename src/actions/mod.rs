//! Filesystem actions on duplicate groups.

pub mod link;

pub use link::{BatchLinkResult, LinkConfig, LinkError, Linker};
