//! Run statistics
//!
//! This module aggregates the counters reported for one invocation and
//! prints them for the command-line interface.

use crate::dedup::DedupOutput;
use serde::{Deserialize, Serialize};

/// Counters published for one invocation
///
/// `total_input == duplicates_removed + total_output + invalid_urls`.
/// Parse failures never count as duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of URLs supplied, including unparseable ones
    pub total_input: u64,

    /// URLs dropped because their key reached its retention quota
    pub duplicates_removed: u64,

    /// Number of URLs in the returned list
    pub total_output: u64,

    /// URLs skipped because they could not be parsed
    #[serde(default)]
    pub invalid_urls: u64,
}

impl Stats {
    /// Aggregates the counters of a finished deduplication
    pub fn from_output(output: &DedupOutput) -> Self {
        Self {
            total_input: output.total_input,
            duplicates_removed: output.duplicates_removed,
            total_output: output.urls.len() as u64,
            invalid_urls: output.invalid_urls,
        }
    }

    /// Returns true if the counters add up
    pub fn is_consistent(&self) -> bool {
        self.total_input == self.duplicates_removed + self.total_output + self.invalid_urls
    }
}

/// Prints statistics to stderr, keeping stdout free for refined URLs
pub fn print_statistics(stats: &Stats) {
    eprintln!("=== Refine Statistics ===");
    eprintln!("  URLs processed: {}", stats.total_input);
    eprintln!("  Duplicates removed: {}", stats.duplicates_removed);
    eprintln!("  URLs output: {}", stats.total_output);
    if stats.invalid_urls > 0 {
        eprintln!("  Invalid URLs skipped: {}", stats.invalid_urls);
    }

    let kept_rate = if stats.total_input > 0 {
        (stats.total_output as f64 / stats.total_input as f64) * 100.0
    } else {
        0.0
    };
    eprintln!("  Kept: {:.1}%", kept_rate);
}
