//! Liveness aggregator library.
//!
//! Polls a static list of service health endpoints concurrently and serves
//! the merged result on `GET /health`.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::AggregatorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
