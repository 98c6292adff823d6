//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Reject unusable or duplicate targets
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AggregatorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::AggregatorConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one target must be configured")]
    NoTargets,

    #[error("target #{index} has an empty name")]
    EmptyTargetName { index: usize },

    #[error("duplicate target name '{0}'")]
    DuplicateTargetName(String),

    #[error("target '{name}' has invalid url '{url}': {reason}")]
    InvalidTargetUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("probe.timeout_ms must be greater than zero")]
    ZeroProbeTimeout,

    #[error("request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("probe.timeout_ms ({probe_ms}) must be below request_timeout_secs ({request_secs}s)")]
    ProbeTimeoutExceedsRequestTimeout { probe_ms: u64, request_secs: u64 },

    #[error("service_name must not be empty")]
    EmptyServiceName,

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &AggregatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service_name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    if config.targets.is_empty() {
        errors.push(ValidationError::NoTargets);
    }

    let mut seen = HashSet::new();
    for (index, target) in config.targets.iter().enumerate() {
        if target.name.trim().is_empty() {
            errors.push(ValidationError::EmptyTargetName { index });
        } else if !seen.insert(target.name.as_str()) {
            errors.push(ValidationError::DuplicateTargetName(target.name.clone()));
        }

        match Url::parse(&target.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidTargetUrl {
                name: target.name.clone(),
                url: target.url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidTargetUrl {
                name: target.name.clone(),
                url: target.url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.probe.timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if config.probe.timeout_ms >= config.request_timeout_secs.saturating_mul(1_000) {
        // /health must finish its slowest probe before the outer timeout cuts it off.
        errors.push(ValidationError::ProbeTimeoutExceedsRequestTimeout {
            probe_ms: config.probe.timeout_ms,
            request_secs: config.request_timeout_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
