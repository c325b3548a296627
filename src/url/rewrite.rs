use crate::config::{Configuration, RewriteConfig, RewriteMode};
use crate::url::parser::ParsedUrl;

/// Re-serializes a URL with its query values rewritten
///
/// Each query value is replaced by, or suffixed with, the rewrite text.
/// Parameters listed in `exclude_params` keep their original values.
/// URLs without a query are returned exactly as written. Any other scheme
/// keeps the spelling it was written with.
///
/// # Examples
///
/// ```
/// use url_refiner::config::{Configuration, DedupMode, RewriteConfig, RewriteMode};
/// use url_refiner::url::{parse, rewrite_url};
///
/// let config = Configuration::new(DedupMode::Exact, 1);
/// let rewrite = RewriteConfig { mode: RewriteMode::Replace, value: "FUZZ".to_string() };
///
/// let parsed = parse("https://example.com/page?user=admin&session=123").unwrap();
/// assert_eq!(
///     rewrite_url(&parsed, &rewrite, &config),
///     "https://example.com/page?user=FUZZ&session=FUZZ"
/// );
/// ```
pub fn rewrite_url(parsed: &ParsedUrl, rewrite: &RewriteConfig, config: &Configuration) -> String {
    if parsed.query().is_empty() {
        return parsed.source().to_string();
    }

    let pairs = parsed.query().iter().map(|(name, value)| {
        let new_value = if config.is_excluded(name) {
            value.clone()
        } else {
            match rewrite.mode {
                RewriteMode::Replace => rewrite.value.clone(),
                RewriteMode::Append => format!("{}{}", value, rewrite.value),
            }
        };
        (name.as_str(), new_value)
    });

    let mut url = parsed.url().clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);

    let serialized = url.to_string();
    let after_scheme = &serialized[url.scheme().len()..];
    format!("{}{}", parsed.scheme(), after_scheme)
}
