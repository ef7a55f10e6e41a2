//! dupelink - duplicate file remover
//!
//! A cross-platform CLI tool that finds files with identical content
//! and reclaims space by replacing all but one copy of each duplicate
//! set with a link to the retained copy: soft links on POSIX systems,
//! hard links on Windows.

pub mod actions;
pub mod app;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod interact;
pub mod logging;
pub mod output;
pub mod platform;
pub mod scanner;

pub use app::run_app;
