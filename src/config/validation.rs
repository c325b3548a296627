use crate::config::types::{Configuration, DedupMode, RawConfig, RawValue, RewriteConfig};
use crate::ConfigError;

const DEFAULT_VALUE: i64 = 1;

impl RawConfig {
    /// Validates the wire configuration and produces a [`Configuration`]
    ///
    /// # Errors
    ///
    /// * `ConfigError::UnknownMode` - mode is neither "exact" nor "fuzzy"
    /// * `ConfigError::InvalidValue` - value is not an integer, or is < 1
    /// * `ConfigError::Validation` - an excluded parameter name or the rewrite is unusable
    pub fn validate(&self) -> Result<Configuration, ConfigError> {
        let mode = validate_mode(self.mode.as_deref())?;
        let value = validate_value(self.value.as_ref())?;

        let exclude_params = self
            .exclude_params
            .as_ref()
            .map(|list| list.names())
            .unwrap_or_default();
        for name in &exclude_params {
            validate_param_name(name)?;
        }

        if let Some(rewrite) = &self.rewrite {
            validate_rewrite(rewrite)?;
        }

        Ok(Configuration {
            mode,
            value,
            exclude_params: exclude_params.into_iter().collect(),
            ignore_path: self.ignore_path,
            rewrite: self.rewrite.clone(),
        })
    }
}

/// Validates the mode name; a missing mode means exact
fn validate_mode(mode: Option<&str>) -> Result<DedupMode, ConfigError> {
    match mode {
        None => Ok(DedupMode::Exact),
        Some(name) => {
            DedupMode::from_name(name).ok_or_else(|| ConfigError::UnknownMode(name.to_string()))
        }
    }
}

/// Validates the retention value; it must be an integer >= 1 in both modes
fn validate_value(value: Option<&RawValue>) -> Result<u32, ConfigError> {
    let parsed = match value {
        None => DEFAULT_VALUE,
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(text)) => text.trim().parse::<i64>().map_err(|_| {
            ConfigError::InvalidValue(format!("value must be an integer, got '{}'", text))
        })?,
    };

    if parsed < 1 {
        return Err(ConfigError::InvalidValue(format!(
            "value must be >= 1, got {}",
            parsed
        )));
    }

    u32::try_from(parsed)
        .map_err(|_| ConfigError::InvalidValue(format!("value is too large: {}", parsed)))
}

/// Parameter names are matched verbatim, so they must not carry query syntax
fn validate_param_name(name: &str) -> Result<(), ConfigError> {
    if name.contains(['&', '=', '?', '#']) {
        return Err(ConfigError::Validation(format!(
            "excluded parameter '{}' contains query syntax characters",
            name
        )));
    }

    Ok(())
}

fn validate_rewrite(rewrite: &RewriteConfig) -> Result<(), ConfigError> {
    if rewrite.value.is_empty() {
        return Err(ConfigError::Validation(
            "rewrite value cannot be empty".to_string(),
        ));
    }

    Ok(())
}
