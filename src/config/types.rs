use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration as it arrives over the request boundary or from a TOML file
///
/// Nothing here is validated yet; see [`RawConfig::validate`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawConfig {
    /// "exact" or "fuzzy" (case-insensitive)
    #[serde(default)]
    pub mode: Option<String>,

    /// Retention quota, as a number or a string-encoded integer
    #[serde(default)]
    pub value: Option<RawValue>,

    /// Parameter names removed before comparison
    #[serde(default, alias = "exclude-params")]
    pub exclude_params: Option<RawParamList>,

    /// Compare on host and query only
    #[serde(default, alias = "ignore-path")]
    pub ignore_path: bool,

    /// Optional rewriting of emitted query values
    #[serde(default)]
    pub rewrite: Option<RewriteConfig>,
}

/// The `value` field accepts `2` as well as `"2"`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(i64),
    Text(String),
}

/// The `exclude_params` field accepts a list or a comma-separated string
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RawParamList {
    List(Vec<String>),
    Csv(String),
}

impl RawParamList {
    /// Returns the trimmed, non-empty parameter names
    pub fn names(&self) -> Vec<String> {
        let tokens: Vec<&str> = match self {
            Self::List(items) => items.iter().flat_map(|s| s.split(',')).collect(),
            Self::Csv(s) => s.split(',').collect(),
        };

        tokens
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Comparison semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupMode {
    /// Literal canonical URL comparison
    Exact,
    /// Structural pattern comparison
    Fuzzy,
}

impl DedupMode {
    /// Parses a mode name, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// How emitted query values are rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Replace every value with the rewrite text
    Replace,
    /// Append the rewrite text to every value
    Append,
}

/// Rewriting of query values in emitted URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    pub mode: RewriteMode,

    #[serde(default = "default_rewrite_value")]
    pub value: String,
}

fn default_rewrite_value() -> String {
    "FUZZ".to_string()
}

/// Validated configuration for one pipeline invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub mode: DedupMode,

    /// Always >= 1
    pub value: u32,

    /// Case-sensitive parameter names
    pub exclude_params: BTreeSet<String>,

    pub ignore_path: bool,

    pub rewrite: Option<RewriteConfig>,
}

impl Configuration {
    /// Creates a configuration with no exclusions, path comparison and no rewriting
    pub fn new(mode: DedupMode, value: u32) -> Self {
        Self {
            mode,
            value,
            exclude_params: BTreeSet::new(),
            ignore_path: false,
            rewrite: None,
        }
    }

    /// Maximum number of URLs kept per comparison key
    pub fn retention_quota(&self) -> u32 {
        match self.mode {
            DedupMode::Exact => 1,
            DedupMode::Fuzzy => self.value,
        }
    }

    /// Returns true if the named parameter is excluded from comparison
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude_params.contains(name)
    }
}
