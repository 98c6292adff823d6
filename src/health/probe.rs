//! Single-target health probe.
//!
//! # Responsibilities
//! - Issue one bounded-time GET against a target's health endpoint
//! - Decode the JSON payload the target reports about itself
//! - Fold every failure into a `ProbeResult` with `status = "error"`
//!
//! # Design Decisions
//! - No retries, no caching: one outbound call per probe
//! - The timeout covers connect, response headers and body
//! - Decode failures report a fixed message; parser details stay in the logs

use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;
use tokio::time;

use crate::config::{ProbeConfig, TargetConfig};
use crate::health::model::ProbeResult;

/// Message reported for any payload that is not a valid health document.
pub const DECODE_FAILURE: &str = "failed to decode response";

/// Why a probe failed. Converted to a `ProbeResult` before leaving this module.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{}", error_chain(.0))]
    Transport(reqwest::Error),

    #[error("failed to decode response")]
    Decode(reqwest::Error),
}

/// Render an error with its sources, e.g. `error sending request: connection refused`.
fn error_chain<E: StdError + ?Sized>(err: &E) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Performs health probes with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
    override_bot_name: bool,
}

impl Prober {
    /// Build a prober from configuration.
    pub fn new(config: &ProbeConfig, override_bot_name: bool) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            timeout: config.timeout(),
            override_bot_name,
        })
    }

    /// Per-probe deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check one target. Never fails: errors become `status = "error"` results.
    pub async fn probe(&self, target: &TargetConfig) -> ProbeResult {
        match self.fetch(&target.url).await {
            Ok(mut result) => {
                if self.override_bot_name {
                    result.bot = target.name.clone();
                }
                tracing::debug!(
                    target_name = %target.name,
                    status = ?result.status,
                    connected = result.connected,
                    "Probe completed"
                );
                result
            }
            Err(e) => {
                match &e {
                    ProbeError::Decode(source) => tracing::warn!(
                        target_name = %target.name,
                        url = %target.url,
                        error = %error_chain(source),
                        "Probe failed: undecodable payload"
                    ),
                    other => tracing::warn!(
                        target_name = %target.name,
                        url = %target.url,
                        error = %other,
                        "Probe failed"
                    ),
                }
                ProbeResult::failure(target.name.clone(), e.to_string())
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<ProbeResult, ProbeError> {
        let exchange = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(ProbeError::Transport)?;
            response.json::<ProbeResult>().await.map_err(ProbeError::Decode)
        };

        match time::timeout(self.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        }
    }
}
