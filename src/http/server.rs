//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, CORS, request ID)
//! - Bind server to listener
//! - Stop on Ctrl+C or an explicit shutdown trigger

use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AggregatorConfig;
use crate::health::{Aggregator, Prober};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::stop_requested;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub service_name: Arc<str>,
}

/// HTTP server for the health aggregator.
pub struct HttpServer {
    router: Router,
    config: AggregatorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the outbound HTTP client cannot be built.
    pub fn new(config: AggregatorConfig) -> Result<Self, reqwest::Error> {
        let prober = Prober::new(&config.probe, config.override_bot_name)?;
        let aggregator = Aggregator::new(config.targets.clone(), prober);

        let state = AppState {
            aggregator: Arc::new(aggregator),
            service_name: Arc::from(config.service_name.as_str()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AggregatorConfig, state: AppState) -> Router {
        // Public status endpoint: any origin may read it.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS]);

        Router::new()
            .route("/health", get(handlers::health))
            .route("/", get(handlers::root))
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(cors)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            targets = self.config.targets.len(),
            probe_timeout_ms = self.config.probe.timeout_ms,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(stop_requested(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }
}
