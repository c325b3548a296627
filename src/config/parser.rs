use crate::config::types::{Configuration, RawConfig};
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads a TOML configuration file without validating it
///
/// The file uses the same fields as the request boundary; kebab-case
/// aliases (`exclude-params`, `ignore-path`) are accepted.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use url_refiner::config::load_raw_config;
///
/// let raw = load_raw_config(Path::new("refiner.toml")).unwrap();
/// println!("Mode: {:?}", raw.mode);
/// ```
pub fn load_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let raw: RawConfig = toml::from_str(&content)?;
    Ok(raw)
}

/// Loads and validates a TOML configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Configuration)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    load_raw_config(path)?.validate()
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged alongside a run so that two outputs can be traced back to the
/// same settings.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a raw configuration and returns both the config and its hash
pub fn load_raw_config_with_hash(path: &Path) -> Result<(RawConfig, String), ConfigError> {
    let raw = load_raw_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((raw, hash))
}
