//! Request façade: the single entry point for callers
//!
//! Every input maps to exactly one [`Response`]. Empty input and invalid
//! configuration abort before any URL is processed; unparseable URLs are
//! skipped and counted; any other fault is caught here and reported as an
//! error response.

use crate::config::{Configuration, RawConfig};
use crate::dedup::dedup;
use crate::output::Stats;
use crate::{RefinerError, Result};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// One refine request as sent over the request/response boundary
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Request {
    pub urls: Vec<String>,

    #[serde(default)]
    pub config: RawConfig,
}

/// Discriminated result of one request, tagged by `status`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success { data: Vec<String>, stats: Stats },
    Error { message: String },
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    fn from_error(error: RefinerError) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }
}

/// Processes a list of URLs under a wire configuration
///
/// # Examples
///
/// ```
/// use url_refiner::config::{RawConfig, RawValue};
/// use url_refiner::{process, Response};
///
/// let config = RawConfig {
///     mode: Some("exact".to_string()),
///     value: Some(RawValue::Text("1".to_string())),
///     ..RawConfig::default()
/// };
/// let urls = vec![
///     "http://a.com/x?b=2&a=1".to_string(),
///     "http://a.com/x?a=1&b=2".to_string(),
/// ];
///
/// match process(&urls, &config) {
///     Response::Success { data, stats } => {
///         assert_eq!(data, vec!["http://a.com/x?b=2&a=1"]);
///         assert_eq!(stats.duplicates_removed, 1);
///     }
///     Response::Error { message } => panic!("unexpected error: {}", message),
/// }
/// ```
pub fn process<S: AsRef<str>>(urls: &[S], config: &RawConfig) -> Response {
    match try_process(urls, config) {
        Ok((data, stats)) => Response::Success { data, stats },
        Err(e) => {
            tracing::warn!("Refine request failed: {}", e);
            Response::from_error(e)
        }
    }
}

/// Processes a decoded [`Request`]
pub fn process_request(request: &Request) -> Response {
    process(&request.urls, &request.config)
}

/// Handles one JSON-encoded request and returns the JSON-encoded response
///
/// Malformed JSON produces an error response rather than a failure.
pub fn handle_json(input: &str) -> String {
    let response = match serde_json::from_str::<Request>(input) {
        Ok(request) => process_request(&request),
        Err(e) => Response::from_error(RefinerError::Json(e)),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        tracing::error!("Failed to encode response: {}", e);
        r#"{"status":"error","message":"failed to encode response"}"#.to_string()
    })
}

/// Runs the pipeline with an already validated configuration
///
/// # Errors
///
/// * `RefinerError::EmptyInput` - `urls` is empty
/// * `RefinerError::Unexpected` - an internal fault interrupted processing
pub fn refine<S: AsRef<str>>(
    urls: &[S],
    config: &Configuration,
) -> Result<(Vec<String>, Stats)> {
    if urls.is_empty() {
        return Err(RefinerError::EmptyInput);
    }

    let output = panic::catch_unwind(AssertUnwindSafe(|| dedup(urls, config)))
        .map_err(|payload| RefinerError::Unexpected(panic_message(&*payload)))?;

    let stats = Stats::from_output(&output);
    tracing::info!(
        "Processed {} URLs ({} mode): {} kept, {} duplicates, {} invalid",
        stats.total_input,
        config.mode.as_str(),
        stats.total_output,
        stats.duplicates_removed,
        stats.invalid_urls
    );

    Ok((output.urls, stats))
}

fn try_process<S: AsRef<str>>(urls: &[S], raw: &RawConfig) -> Result<(Vec<String>, Stats)> {
    if urls.is_empty() {
        return Err(RefinerError::EmptyInput);
    }

    let config = raw.validate()?;
    refine(urls, &config)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal error".to_string()
    }
}
