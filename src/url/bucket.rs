//! Type buckets for fuzzy comparison
//!
//! In fuzzy mode every path segment and query value is replaced by the
//! bucket it falls into, so `/user/123` and `/user/456` share a pattern.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Minimum length for an all-hex token to count as [`Bucket::Hex`]
const MIN_HEX_LEN: usize = 8;

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

/// Structural class of a path segment or query value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// ASCII digits only
    Num,
    /// 8-4-4-4-12 hex groups
    Uuid,
    /// Hex digits only, at least 8 long
    Hex,
    /// Letters only
    Alpha,
    /// Anything else
    Mixed,
    /// Zero-length
    Empty,
}

impl Bucket {
    /// Classifies a decoded token
    ///
    /// Checks run in order, so `12345678` is `Num` rather than `Hex` and
    /// `deadbeef` is `Hex` rather than `Alpha`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_refiner::url::Bucket;
    ///
    /// assert_eq!(Bucket::classify("123"), Bucket::Num);
    /// assert_eq!(Bucket::classify("9f2a6c1e4b"), Bucket::Hex);
    /// assert_eq!(Bucket::classify("profile"), Bucket::Alpha);
    /// assert_eq!(Bucket::classify("v2-final"), Bucket::Mixed);
    /// ```
    pub fn classify(token: &str) -> Self {
        if token.is_empty() {
            Self::Empty
        } else if token.bytes().all(|b| b.is_ascii_digit()) {
            Self::Num
        } else if UUID_REGEX.is_match(token) {
            Self::Uuid
        } else if token.len() >= MIN_HEX_LEN && token.bytes().all(|b| b.is_ascii_hexdigit()) {
            Self::Hex
        } else if token.chars().all(char::is_alphabetic) {
            Self::Alpha
        } else {
            Self::Mixed
        }
    }

    /// Tag used in fuzzy comparison keys
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Num => "NUM",
            Self::Uuid => "UUID",
            Self::Hex => "HEX",
            Self::Alpha => "ALPHA",
            Self::Mixed => "MIXED",
            Self::Empty => "EMPTY",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
