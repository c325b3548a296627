//! Deduplication of an ordered URL list
//!
//! The deduplicator is a stable filter: URLs are visited in input order and
//! emitted in input order, with at most `retention_quota()` URLs kept per
//! comparison key. Every call owns its own deduplicator, so nothing is
//! shared between invocations.

use crate::config::Configuration;
use crate::url::{comparison_key, rewrite_url, ComparisonKey};
use crate::UrlError;
use std::collections::HashMap;

/// What happened to one offered URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Emitted to output
    Kept,
    /// Dropped because its key already reached the retention quota
    Duplicate,
    /// Skipped because it could not be parsed
    Invalid(UrlError),
}

/// Result of deduplicating a full list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupOutput {
    /// Emitted URLs, in input order
    pub urls: Vec<String>,

    /// Number of URLs offered, including unparseable ones
    pub total_input: u64,

    /// URLs dropped because their key was full
    pub duplicates_removed: u64,

    /// URLs skipped as unparseable
    pub invalid_urls: u64,
}

/// Retention-quota filter over a stream of raw URLs
///
/// The deduplicator tracks:
/// - How many URLs have been kept per comparison key
/// - The emitted URLs in input order
/// - Counts of duplicates and parse failures
pub struct Deduplicator<'a> {
    /// Configuration for this invocation
    config: &'a Configuration,

    /// Retained count per comparison key
    counts: HashMap<ComparisonKey, u32>,

    /// Emitted URLs
    kept: Vec<String>,

    total_input: u64,
    duplicates_removed: u64,
    invalid_urls: u64,
}

impl<'a> Deduplicator<'a> {
    /// Creates an empty deduplicator for one invocation
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            counts: HashMap::new(),
            kept: Vec::new(),
            total_input: 0,
            duplicates_removed: 0,
            invalid_urls: 0,
        }
    }

    /// Offers the next URL in input order
    ///
    /// This method:
    /// 1. Counts the URL as input
    /// 2. Parses, normalizes and keys it; a parse failure is skipped
    /// 3. Emits it if its key has fewer than `retention_quota()` kept URLs
    /// 4. Otherwise drops it as a duplicate
    pub fn offer(&mut self, raw: &str) -> Outcome {
        self.total_input += 1;

        let (key, parsed) = match comparison_key(raw, self.config) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::debug!("Skipping unparseable URL {:?}: {}", raw, e);
                self.invalid_urls += 1;
                return Outcome::Invalid(e);
            }
        };

        if !parsed.is_normalizable() {
            tracing::warn!(
                "Scheme '{}' is not http/https, keeping it as written for {}",
                parsed.scheme(),
                raw
            );
        }

        let quota = self.config.retention_quota();
        let count = self.counts.entry(key).or_insert(0);
        if *count >= quota {
            tracing::trace!("Dropping duplicate URL: {}", raw);
            self.duplicates_removed += 1;
            return Outcome::Duplicate;
        }
        *count += 1;

        let emitted = match &self.config.rewrite {
            Some(rewrite) => rewrite_url(&parsed, rewrite, self.config),
            None => raw.to_string(),
        };
        self.kept.push(emitted);

        Outcome::Kept
    }

    /// Number of distinct comparison keys seen so far
    pub fn distinct_keys(&self) -> usize {
        self.counts.len()
    }

    /// Consumes the deduplicator and returns the emitted URLs with counters
    pub fn finish(self) -> DedupOutput {
        DedupOutput {
            urls: self.kept,
            total_input: self.total_input,
            duplicates_removed: self.duplicates_removed,
            invalid_urls: self.invalid_urls,
        }
    }
}

/// Deduplicates an ordered list of raw URLs
///
/// # Examples
///
/// ```
/// use url_refiner::config::{Configuration, DedupMode};
/// use url_refiner::dedup;
///
/// let config = Configuration::new(DedupMode::Fuzzy, 2);
/// let urls = ["http://a.com/item/1", "http://a.com/item/2", "http://a.com/item/3"];
///
/// let output = dedup(&urls, &config);
/// assert_eq!(output.urls, vec!["http://a.com/item/1", "http://a.com/item/2"]);
/// assert_eq!(output.duplicates_removed, 1);
/// ```
pub fn dedup<S: AsRef<str>>(urls: &[S], config: &Configuration) -> DedupOutput {
    let mut deduplicator = Deduplicator::new(config);
    for url in urls {
        deduplicator.offer(url.as_ref());
    }

    tracing::debug!(
        "Deduplicated {} URLs into {} distinct keys",
        urls.len(),
        deduplicator.distinct_keys()
    );

    deduplicator.finish()
}
