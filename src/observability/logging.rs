//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick the log level from config unless `RUST_LOG` is set
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` always wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter directive for a configured level.
pub fn default_directive(level: &str) -> String {
    format!("health_aggregator={level},tower_http={level}")
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(&config.log_level).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive("debug"),
            "health_aggregator=debug,tower_http=debug"
        );
    }
}
