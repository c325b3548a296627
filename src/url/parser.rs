use crate::UrlError;
use url::Url;

/// Schemes whose URLs are canonicalized structurally
const NORMALIZABLE_SCHEMES: &[&str] = &["http", "https"];

/// Path of a parsed URL as seen by comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPath {
    /// Percent-decoded segments, without trailing empty segments. `/` is empty.
    Segments(Vec<String>),
    /// The path does not take part in comparison
    Ignored,
}

/// Structured view of one raw URL
///
/// Built once by [`parse`] and never mutated; [`super::normalize`] derives
/// a new value instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    pub(super) source: String,
    pub(super) url: Url,
    pub(super) scheme: String,
    pub(super) host: String,
    pub(super) port: Option<u16>,
    pub(super) path: UrlPath,
    pub(super) query: Vec<(String, String)>,
    pub(super) fragment: Option<String>,
    pub(super) normalizable: bool,
}

impl ParsedUrl {
    /// The input text this URL was parsed from, trimmed
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Lower-cased for http/https; verbatim for any other scheme
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Lower-cased host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit non-default port
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &UrlPath {
        &self.path
    }

    /// Decoded query pairs in the order they appeared
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// False for schemes other than http/https; such URLs keep the scheme as written
    pub fn is_normalizable(&self) -> bool {
        self.normalizable
    }

    /// The underlying parsed URL, used when re-serializing output
    pub(crate) fn url(&self) -> &Url {
        &self.url
    }
}

/// Parses a raw URL string into its components
///
/// # Parsing Rules
///
/// 1. Surrounding whitespace is ignored; an empty string is rejected
/// 2. Every `%` must start a two-digit hex escape
/// 3. The URL must be absolute (`scheme://host...`) with a non-empty host
/// 4. Scheme and host are lower-cased, default ports dropped
/// 5. Path segments are percent-decoded; trailing slashes are dropped
/// 6. Query names and values are percent-decoded, order preserved
///
/// Schemes other than http/https parse successfully but are flagged as
/// non-normalizable, keeping the scheme as written.
///
/// # Examples
///
/// ```
/// use url_refiner::url::{parse, UrlPath};
///
/// let parsed = parse("HTTP://Example.COM/a/b/?x=1#top").unwrap();
/// assert_eq!(parsed.scheme(), "http");
/// assert_eq!(parsed.host(), "example.com");
/// assert_eq!(parsed.path(), &UrlPath::Segments(vec!["a".into(), "b".into()]));
/// assert_eq!(parsed.query(), &[("x".to_string(), "1".to_string())]);
/// ```
pub fn parse(raw: &str) -> Result<ParsedUrl, UrlError> {
    let source = raw.trim();
    if source.is_empty() {
        return Err(UrlError::Empty);
    }

    // The fragment never takes part in comparison, so its escapes are not checked
    let before_fragment = source.split_once('#').map_or(source, |(head, _)| head);
    check_escapes(before_fragment)?;

    let url = Url::parse(source).map_err(|e| UrlError::Parse(e.to_string()))?;

    // The url crate accepts "http:example.com"; require an explicit authority
    let written_scheme = source
        .split_once(':')
        .map(|(scheme, rest)| (scheme, rest.starts_with("//")));
    let written_scheme = match written_scheme {
        Some((scheme, true)) => scheme,
        _ => return Err(UrlError::MissingHost),
    };

    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_lowercase(),
        _ => return Err(UrlError::MissingHost),
    };

    let normalizable = NORMALIZABLE_SCHEMES.contains(&url.scheme());
    let scheme = if normalizable {
        url.scheme().to_string()
    } else {
        written_scheme.to_string()
    };

    let path = UrlPath::Segments(decode_path(&url)?);

    let query = decode_query(&url)?;

    Ok(ParsedUrl {
        source: source.to_string(),
        port: url.port(),
        fragment: url.fragment().map(str::to_string),
        scheme,
        host,
        path,
        query,
        normalizable,
        url,
    })
}

/// Returns true if the string parses as an absolute URL with a host
pub fn is_valid_url(raw: &str) -> bool {
    parse(raw).is_ok()
}

/// Rejects `%` not followed by two hex digits
fn check_escapes(s: &str) -> Result<(), UrlError> {
    let bytes = s.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'%' {
            continue;
        }

        let valid = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !valid {
            let end = (i + 3).min(s.len());
            return Err(UrlError::MalformedEscape(
                String::from_utf8_lossy(&bytes[i..end]).into_owned(),
            ));
        }
    }

    Ok(())
}

/// Decodes path segments and drops the empty segments a trailing slash leaves
fn decode_path(url: &Url) -> Result<Vec<String>, UrlError> {
    let mut segments = Vec::new();

    if let Some(parts) = url.path_segments() {
        for part in parts {
            let decoded = urlencoding::decode(part)
                .map_err(|_| UrlError::MalformedEscape(part.to_string()))?;
            segments.push(decoded.into_owned());
        }
    }

    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    Ok(segments)
}

/// Decodes query pairs strictly; escapes that are not valid UTF-8 are rejected
///
/// Pairs are split on `&`, then at the first `=`; `+` means a space and
/// empty pieces are skipped.
fn decode_query(url: &Url) -> Result<Vec<(String, String)>, UrlError> {
    let Some(query) = url.query() else {
        return Ok(Vec::new());
    };

    query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let (name, value) = piece.split_once('=').unwrap_or((piece, ""));
            Ok((decode_component(name)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(component: &str) -> Result<String, UrlError> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UrlError::MalformedEscape(component.to_string()))
}
