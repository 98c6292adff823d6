//! Health aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → aggregator.rs: one probe future per configured target
//!     → probe.rs: bounded GET + JSON decode, failures folded into ProbeResult
//!     → join (all probes, target order preserved)
//!     → model.rs: count up/down, derive ok/degraded/error, stamp checked_at
//! ```
//!
//! # Design Decisions
//! - Per-target failures are data, never errors crossing the probe boundary
//! - No state survives between cycles; every request triggers a fresh fan-out

pub mod aggregator;
pub mod model;
pub mod probe;

pub use aggregator::Aggregator;
pub use model::{AggregateStatus, AggregatedHealth, ProbeResult, ProbeStatus};
pub use probe::{ProbeError, Prober, DECODE_FAILURE};
