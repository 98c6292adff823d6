//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! probe.rs       → per-target warn!/debug! events
//! aggregator.rs  → one summary event per cycle (status, up/down, elapsed)
//! server.rs      → TraceLayer request spans carrying x-request-id
//!     → logging.rs (fmt subscriber, EnvFilter) → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
