//! HTTP server bootstrap and lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

use crate::router::{build_router, AppState};

/// A running FileDock server.
///
/// The server accepts connections on a background task until
/// [`Server::shutdown`] is called or the handle is dropped.
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Bind `bind_addr` and start serving `state`.
    ///
    /// Binding port 0 picks a free port; [`Server::addr`] reports the actual
    /// address.
    pub async fn start(bind_addr: SocketAddr, state: Arc<AppState>) -> Result<Self> {
        let app = build_router(state);

        let listener = TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind {bind_addr}"))?;
        let addr = listener
            .local_addr()
            .context("Failed to read local address")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        info!("Listening on http://{}", addr);

        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    /// The address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal graceful shutdown. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}
