//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     CLI → config file → env overlay → validate → logging → bind → serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or Shutdown::trigger → stop accepting → drain in-flight requests → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: a bind or config error is fatal
//! - Shutdown is a broadcast so tests can stop servers they spawned

pub mod shutdown;

pub use shutdown::{stop_requested, Shutdown};
