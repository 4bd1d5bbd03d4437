//! View server runtime integration.
//!
//! Bridges the sync game loop with the async TCP server. The game loop keeps
//! publishing into the shared [`SnapshotGate`]; this handle owns the tokio
//! runtime the server runs on.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

use crate::server::{run_server, ServerConfig, ServerState};
use tui_reveal_core::SnapshotGate;

/// Running view server instance.
///
/// Dropping it shuts the runtime down, closing the listener and every client.
pub struct ViewServer {
    _rt: Runtime,
    addr: SocketAddr,
    state: Arc<ServerState>,
}

impl ViewServer {
    /// Bind the listener and start serving snapshots from `gate`.
    ///
    /// Returns once the socket is bound, so bind errors surface here.
    pub fn start(config: ServerConfig, gate: Arc<SnapshotGate>) -> anyhow::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("reveal-view")
            .enable_all()
            .build()
            .context("failed to create tokio runtime")?;

        let state = Arc::new(ServerState::new(config, gate));
        let (ready_tx, ready_rx) = oneshot::channel();
        let handle = rt.spawn(run_server(Arc::clone(&state), Some(ready_tx)));

        let addr = match rt.block_on(ready_rx) {
            Ok(addr) => addr,
            Err(_) => {
                // The sender was dropped, so the server task ended before binding.
                let err = match rt.block_on(handle) {
                    Ok(Err(e)) => e,
                    Ok(Ok(())) => anyhow::anyhow!("view server stopped before binding"),
                    Err(join) => anyhow::anyhow!("view server task failed: {join}"),
                };
                return Err(err.context(format!(
                    "failed to start view server on {}",
                    state.config().addr
                )));
            }
        };

        Ok(Self {
            _rt: rt,
            addr,
            state,
        })
    }

    /// Address the listener is actually bound to
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of currently connected clients
    pub fn client_count(&self) -> usize {
        self.state.client_count()
    }
}
