//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use health_aggregator::config::{AggregatorConfig, TargetConfig};
use health_aggregator::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const HEALTHY: &str = r#"{"status":"ok","bot":"x","connected":true,"uptime":"3h"}"#;

/// Drain the request head so closing the socket does not reset the connection.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Start a programmable backend on an ephemeral port.
///
/// `f` returns the status code and JSON body for each request.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend that always answers 200 with `body`.
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (200, body.to_string()) }).await
}

/// Backend that answers 200 with `body` after `delay`.
pub async fn start_slow_backend(body: &'static str, delay: Duration) -> SocketAddr {
    start_programmable_backend(move || async move {
        tokio::time::sleep(delay).await;
        (200, body.to_string())
    })
    .await
}

/// Backend that accepts connections and never responds.
pub async fn start_hanging_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address with nothing listening on it.
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn target(name: &str, addr: SocketAddr) -> TargetConfig {
    TargetConfig::new(name, format!("http://{}/health", addr))
}

/// Config pointing at `targets` with a short probe timeout.
pub fn config_for(targets: Vec<TargetConfig>) -> AggregatorConfig {
    let mut config = AggregatorConfig::default();
    config.service_name = "test-aggregator".into();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.probe.timeout_ms = 1_000;
    config.probe.use_env_proxy = false;
    config.targets = targets;
    config
}

/// Serve `config` on an ephemeral port. Trigger the returned `Shutdown` to stop it.
pub async fn spawn_aggregator(config: AggregatorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
