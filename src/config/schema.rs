//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the aggregator.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the health aggregator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Identity reported by `GET /`.
    pub service_name: String,

    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Outbound probe settings.
    pub probe: ProbeConfig,

    /// Upper bound on any inbound request, in seconds.
    pub request_timeout_secs: u64,

    /// Replace the upstream-reported `bot` field with the configured target name.
    pub override_bot_name: bool,

    /// Services polled on every aggregation cycle, in response order.
    pub targets: Vec<TargetConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            service_name: "discord-bots-health-aggregator".to_string(),
            listener: ListenerConfig::default(),
            probe: ProbeConfig::default(),
            request_timeout_secs: 30,
            override_bot_name: true,
            targets: vec![
                TargetConfig::new("eclub-bot", "http://localhost:8080/health"),
                TargetConfig::new("visibleseed-bot", "http://localhost:8081/health"),
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AggregatorConfig {
    /// Outer bound applied to inbound requests.
    ///
    /// Never shorter than one probe plus a second of slack, so `/health`
    /// always answers with a summary rather than a bare timeout.
    pub fn request_timeout(&self) -> Duration {
        let configured = Duration::from_secs(self.request_timeout_secs);
        configured.max(self.probe.timeout() + Duration::from_secs(1))
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
        }
    }
}

/// A single polled service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Name reported in the `bot` field.
    pub name: String,

    /// Full URL of the target's health endpoint.
    pub url: String,
}

impl TargetConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Outbound probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,

    /// User-Agent sent with every probe.
    pub user_agent: String,

    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY` for outbound probes.
    pub use_env_proxy: bool,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            user_agent: concat!("health-aggregator/", env!("CARGO_PKG_VERSION")).to_string(),
            use_env_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
