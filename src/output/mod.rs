//! Output module for reporting refine results
//!
//! This module handles:
//! - Aggregating the published counters
//! - Printing statistics for the command line
//! - Saving refined URLs to timestamped files

pub mod stats;
mod writer;

pub use stats::{print_statistics, Stats};
pub use writer::write_refined;
