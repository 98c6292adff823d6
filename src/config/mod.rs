//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overlay: PORT, HEALTH_TARGETS, PROBE_TIMEOUT_MS (loader.rs)
//!     → validation.rs (semantic checks)
//!     → AggregatorConfig (validated, immutable)
//!     → shared via Arc to the aggregator and HTTP surface
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the target list never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, load_config, read_config, ConfigError};
pub use schema::{AggregatorConfig, ListenerConfig, ObservabilityConfig, ProbeConfig, TargetConfig};
pub use validation::{validate_config, ValidationError};
