//! Configuration module for URL Refiner
//!
//! A configuration arrives either from the request boundary (JSON, with
//! `value` possibly string-encoded) or from a TOML file. Both deserialize
//! into [`RawConfig`], which is validated into a [`Configuration`].
//!
//! # Example
//!
//! ```
//! use url_refiner::config::{DedupMode, RawConfig};
//!
//! let raw: RawConfig = serde_json::from_str(r#"{"mode":"fuzzy","value":"2"}"#).unwrap();
//! let config = raw.validate().unwrap();
//! assert_eq!(config.mode, DedupMode::Fuzzy);
//! assert_eq!(config.retention_quota(), 2);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Configuration, DedupMode, RawConfig, RawParamList, RawValue, RewriteConfig, RewriteMode,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_raw_config, load_raw_config_with_hash};
