use crate::config::{Configuration, DedupMode};
use crate::url::bucket::Bucket;
use crate::url::parser::{ParsedUrl, UrlPath};
use std::fmt;
use url::form_urlencoded;

/// String under which two URLs are considered duplicates
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparisonKey(String);

impl ComparisonKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the comparison key for a normalized URL
///
/// # Key Shapes
///
/// * Exact: `scheme://host[:port]/path?name=value&...` with query pairs
///   sorted by name, then value. Segments and values are re-encoded
///   canonically, so `%2f` and `%2F` compare equal.
/// * Fuzzy: the same layout with every path segment and query value
///   replaced by its [`Bucket`] tag, e.g. `http://a.com/ALPHA/NUM?id=HEX`.
///
/// The fragment never takes part. A scheme other than http/https is kept
/// exactly as written, so `FTP://h/` and `ftp://h/` stay distinct.
///
/// # Examples
///
/// ```
/// use url_refiner::config::{Configuration, DedupMode};
/// use url_refiner::url::{build_key, parse};
///
/// let exact = Configuration::new(DedupMode::Exact, 1);
/// let key = build_key(&parse("http://a.com/x?b=2&a=1#top").unwrap(), &exact);
/// assert_eq!(key.as_str(), "http://a.com/x?a=1&b=2");
///
/// let fuzzy = Configuration::new(DedupMode::Fuzzy, 1);
/// let key = build_key(&parse("http://a.com/user/123?id=9f2a6c1e").unwrap(), &fuzzy);
/// assert_eq!(key.as_str(), "http://a.com/ALPHA/NUM?id=HEX");
/// ```
pub fn build_key(normalized: &ParsedUrl, config: &Configuration) -> ComparisonKey {
    let (path, mut query): (Option<Vec<String>>, Vec<(String, String)>) = match config.mode {
        DedupMode::Exact => (
            segments(normalized).map(|s| s.iter().map(|seg| encode_segment(seg)).collect()),
            normalized
                .query()
                .iter()
                .map(|(k, v)| (encode_component(k), encode_component(v)))
                .collect(),
        ),
        DedupMode::Fuzzy => (
            segments(normalized).map(|s| {
                s.iter()
                    .map(|seg| Bucket::classify(seg).tag().to_string())
                    .collect()
            }),
            normalized
                .query()
                .iter()
                .map(|(k, v)| (encode_component(k), Bucket::classify(v).tag().to_string()))
                .collect(),
        ),
    };

    // Parameter order never makes two URLs distinct
    query.sort();

    let mut key = format!("{}://{}", normalized.scheme(), normalized.host());
    if let Some(port) = normalized.port() {
        key.push_str(&format!(":{}", port));
    }
    if let Some(path) = path {
        key.push('/');
        key.push_str(&path.join("/"));
    }
    key.push('?');
    key.push_str(
        &query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&"),
    );

    ComparisonKey(key)
}

fn segments(parsed: &ParsedUrl) -> Option<&[String]> {
    match parsed.path() {
        UrlPath::Segments(segments) => Some(segments),
        UrlPath::Ignored => None,
    }
}

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn encode_component(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes()).collect()
}
