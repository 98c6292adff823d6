//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign/propagate x-request-id)
//!     → handlers.rs
//!         GET /health → health::Aggregator → 200 | 503 + JSON summary
//!         GET /       → service identity
//!     → CORS + JSON response to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
