use crate::config::Configuration;
use crate::url::parser::{ParsedUrl, UrlPath};

/// Reduces a parsed URL to the view used for comparison
///
/// # Normalization Steps
///
/// 1. Drop every query pair whose name is in `exclude_params` (exact match)
/// 2. Replace the path with [`UrlPath::Ignored`] when `ignore_path` is set
///
/// The input is left untouched, and remaining query pairs keep their
/// original order. The returned value only drives comparison; the URL
/// emitted to output is always the original.
///
/// # Examples
///
/// ```
/// use url_refiner::config::{Configuration, DedupMode};
/// use url_refiner::url::{normalize, parse, UrlPath};
///
/// let mut config = Configuration::new(DedupMode::Exact, 1);
/// config.exclude_params.insert("sid".to_string());
/// config.ignore_path = true;
///
/// let parsed = parse("http://a.com/x?sid=9&q=1").unwrap();
/// let view = normalize(&parsed, &config);
/// assert_eq!(view.query(), &[("q".to_string(), "1".to_string())]);
/// assert_eq!(view.path(), &UrlPath::Ignored);
/// ```
pub fn normalize(parsed: &ParsedUrl, config: &Configuration) -> ParsedUrl {
    let query = parsed
        .query
        .iter()
        .filter(|(name, _)| !config.is_excluded(name))
        .cloned()
        .collect();

    let path = if config.ignore_path {
        UrlPath::Ignored
    } else {
        parsed.path.clone()
    };

    ParsedUrl {
        query,
        path,
        ..parsed.clone()
    }
}
