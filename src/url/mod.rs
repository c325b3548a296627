//! URL handling module for URL Refiner
//!
//! This module turns raw strings into structured URLs, reduces them to a
//! comparison view, and builds the key that decides whether two URLs are
//! duplicates.
//!
//! The pipeline for one URL is `parse` → `normalize` → `build_key`.

mod bucket;
mod key;
mod normalize;
mod parser;
mod rewrite;

// Re-export main functions
pub use bucket::Bucket;
pub use key::{build_key, ComparisonKey};
pub use normalize::normalize;
pub use parser::{is_valid_url, parse, ParsedUrl, UrlPath};
pub use rewrite::rewrite_url;

use crate::config::Configuration;
use crate::UrlError;

/// Parses, normalizes and keys one raw URL
///
/// # Examples
///
/// ```
/// use url_refiner::config::{Configuration, DedupMode};
/// use url_refiner::url::comparison_key;
///
/// let config = Configuration::new(DedupMode::Exact, 1);
/// let a = comparison_key("http://a.com/x?b=2&a=1", &config).unwrap();
/// let b = comparison_key("http://A.com/x/?a=1&b=2#f", &config).unwrap();
/// assert_eq!(a.0, b.0);
/// ```
pub fn comparison_key(
    raw: &str,
    config: &Configuration,
) -> Result<(ComparisonKey, ParsedUrl), UrlError> {
    let parsed = parse(raw)?;
    let key = build_key(&normalize(&parsed, config), config);
    Ok((key, parsed))
}
