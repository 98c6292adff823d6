//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AggregatorConfig, TargetConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the listening port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable replacing the target list (`name=url,name=url`).
pub const ENV_TARGETS: &str = "HEALTH_TARGETS";
/// Environment variable overriding the per-probe timeout.
pub const ENV_PROBE_TIMEOUT_MS: &str = "PROBE_TIMEOUT_MS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<AggregatorConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read a TOML file without validating it, so overlays can still fill gaps.
pub fn read_config(path: &Path) -> Result<AggregatorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AggregatorConfig, ConfigError> {
    let config = read_config(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay process environment variables onto `config`.
pub fn apply_env(config: &mut AggregatorConfig) -> Result<(), ConfigError> {
    apply_env_from(config, |key| std::env::var(key).ok())
}

/// Overlay variables supplied by `lookup` onto `config`.
///
/// Unset and empty variables leave the configured value untouched.
pub fn apply_env_from<F>(config: &mut AggregatorConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut errors = Vec::new();

    if let Some(port) = get(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(p) => config.listener.port = p,
            Err(_) => errors.push(ValidationError::InvalidEnv { key: ENV_PORT, value: port }),
        }
    }

    if let Some(timeout) = get(ENV_PROBE_TIMEOUT_MS) {
        match timeout.trim().parse::<u64>() {
            Ok(ms) => config.probe.timeout_ms = ms,
            Err(_) => errors.push(ValidationError::InvalidEnv {
                key: ENV_PROBE_TIMEOUT_MS,
                value: timeout,
            }),
        }
    }

    if let Some(raw) = get(ENV_TARGETS) {
        match parse_targets(&raw) {
            Some(targets) => config.targets = targets,
            None => errors.push(ValidationError::InvalidEnv { key: ENV_TARGETS, value: raw }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors))
    }
}

/// Parse `name=url,name=url`. Returns `None` if any entry lacks a `=`.
fn parse_targets(raw: &str) -> Option<Vec<TargetConfig>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, url) = entry.split_once('=')?;
            Some(TargetConfig::new(name.trim(), url.trim()))
        })
        .collect()
}
