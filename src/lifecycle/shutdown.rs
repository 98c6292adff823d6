//! Stopping running servers, either from the terminal or programmatically.

use tokio::sync::broadcast;

/// Fans one stop request out to every server that subscribed.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. A no-op when nobody listens.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or when `stop` fires (or its sender is dropped).
///
/// If the Ctrl+C handler cannot be installed, only `stop` ends the wait.
pub async fn stop_requested(mut stop: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown signal received"),
        _ = stop.recv() => tracing::info!("Shutdown requested"),
    }
}
