//! # Snapshot Server
//!
//! HTTP front end that delivers snapshots to browsers.
//!
//! | Path | Description |
//! |------|-------------|
//! | `/` | Viewer page; the first request marks the session ready |
//! | `/data` | WebSocket pushing every snapshot as a JSON text message |
//!
//! Each WebSocket connection is one [`SnapshotBus`] subscriber, so a slow
//! browser only skips intermediate snapshots.

mod config;
mod page;
mod routes;

pub use config::ServerConfig;
pub use routes::build_router;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bus::SnapshotBus;
use crate::error::{McpiError, Result};
use crate::facade::ReadyTrigger;

/// Shared state passed to all request handlers
#[derive(Clone)]
pub struct AppState {
    pub bus: Arc<SnapshotBus>,
    pub ready: ReadyTrigger,
}

/// A running snapshot server
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<()>>,
    shutdown_timeout: Duration,
}

/// Bind the listener and start serving in the background
///
/// Failing to bind is fatal to the session; there is no degraded mode.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<ServerHandle> {
    let listener = TcpListener::bind(&config.bind).await.map_err(|source| McpiError::Bind {
        addr: config.bind.clone(),
        source,
    })?;
    let addr = listener.local_addr()?;
    info!("listening on http://{}", addr);

    let app = build_router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .map_err(|source| McpiError::Serve { addr, source })
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
        shutdown_timeout: config.shutdown_timeout(),
    })
}

impl ServerHandle {
    /// Address the server actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for open ones to finish
    ///
    /// Connections still open after the shutdown timeout are aborted.
    pub async fn shutdown(mut self) {
        debug!(addr = %self.addr, "ServerHandle::shutdown: called");
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        match tokio::time::timeout(self.shutdown_timeout, &mut self.task).await {
            Ok(Ok(Ok(()))) => info!("Snapshot server stopped"),
            Ok(Ok(Err(e))) => warn!(error = %e, "Snapshot server exited with error"),
            Ok(Err(e)) => warn!(error = %e, "Snapshot server task failed"),
            Err(_) => {
                warn!(timeout = ?self.shutdown_timeout, "Snapshot server did not stop in time, aborting");
                self.task.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::ready_signal;

    fn test_config() -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:0".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let (trigger, _waiter) = ready_signal();
        let state = AppState {
            bus: Arc::new(SnapshotBus::new()),
            ready: trigger,
        };

        let server = start_server(&test_config(), state).await.unwrap();
        assert_ne!(server.local_addr().port(), 0);

        tokio::time::timeout(Duration::from_secs(10), server.shutdown())
            .await
            .expect("shutdown should complete");
    }

    #[tokio::test]
    async fn test_bind_failure_is_error() {
        let (trigger, _waiter) = ready_signal();
        let state = AppState {
            bus: Arc::new(SnapshotBus::new()),
            ready: trigger,
        };
        let config = ServerConfig {
            bind: "not-an-address".to_string(),
            ..Default::default()
        };

        let result = start_server(&config, state).await;
        assert!(matches!(result, Err(McpiError::Bind { .. })));
    }
}
