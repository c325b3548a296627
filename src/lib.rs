//! URL Refiner: canonicalize and deduplicate URL lists
//!
//! This crate parses raw URLs, builds a comparison key for each one under
//! either exact or fuzzy (structural) semantics, and keeps at most a
//! configured number of URLs per key while preserving input order.

pub mod config;
pub mod dedup;
pub mod output;
pub mod request;
pub mod url;

use thiserror::Error;

/// Main error type for URL Refiner operations
#[derive(Debug, Error)]
pub enum RefinerError {
    #[error("no URLs supplied")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown mode '{0}' (expected 'exact' or 'fuzzy')")]
    UnknownMode(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Per-URL parse failures. These never abort a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Empty URL")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed percent-encoding: {0}")]
    MalformedEscape(String),
}

/// Result type alias for URL Refiner operations
pub type Result<T> = std::result::Result<T, RefinerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Configuration, DedupMode, RawConfig};
pub use dedup::{dedup, Deduplicator};
pub use output::Stats;
pub use request::{handle_json, process, process_request, refine, Request, Response};
pub use url::{build_key, is_valid_url, normalize, parse, Bucket, ComparisonKey, ParsedUrl};
