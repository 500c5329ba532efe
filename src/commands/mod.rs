//! CLI command implementations for cachetrim operations.
//!
//! Each submodule handles one command: configuration resolution, cache
//! construction against the requested root, and result reporting.

pub mod stats;
pub mod trim;

pub use stats::run_stats;
pub use trim::run_trim;
