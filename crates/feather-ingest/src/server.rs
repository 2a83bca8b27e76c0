//! Server listener: binds the RPC and ops ports and serves both until a
//! shutdown signal arrives.

use std::future::Future;
use std::net::SocketAddr;

use feather_core::error::{FeatherError, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::app_state::AppState;
use crate::router;

pub struct Server {
    state: AppState,
    rpc: TcpListener,
    ops: TcpListener,
}

impl Server {
    /// Bind both listeners from `server.listen` / `server.metrics_listen`.
    pub async fn bind(state: AppState) -> Result<Self> {
        let rpc_addr = state.cfg().server.listen_addr()?;
        let ops_addr = state.cfg().server.metrics_listen_addr()?;

        let rpc = TcpListener::bind(rpc_addr)
            .await
            .map_err(|e| FeatherError::Transport(format!("bind {rpc_addr} failed: {e}")))?;
        let ops = TcpListener::bind(ops_addr)
            .await
            .map_err(|e| FeatherError::Transport(format!("bind {ops_addr} failed: {e}")))?;

        Ok(Self { state, rpc, ops })
    }

    pub fn rpc_addr(&self) -> Result<SocketAddr> {
        self.rpc
            .local_addr()
            .map_err(|e| FeatherError::Transport(format!("rpc local_addr: {e}")))
    }

    pub fn ops_addr(&self) -> Result<SocketAddr> {
        self.ops
            .local_addr()
            .map_err(|e| FeatherError::Transport(format!("ops local_addr: {e}")))
    }

    /// Serve until `shutdown` resolves, then drain in-flight calls.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let rpc_addr = self.rpc_addr()?;
        let ops_addr = self.ops_addr()?;
        tracing::info!(
            %rpc_addr,
            %ops_addr,
            work_delay_ms = self.state.cfg().server.work_delay_ms,
            "ingest server listening"
        );

        let stop = CancellationToken::new();
        let trigger = stop.clone();
        tokio::spawn(async move {
            shutdown.await;
            trigger.cancel();
        });

        let rpc_stop = stop.clone();
        let rpc = axum::serve(self.rpc, router::build_rpc_router(self.state.clone()))
            .with_graceful_shutdown(async move { rpc_stop.cancelled().await });

        let ops_stop = stop.clone();
        let ops = axum::serve(self.ops, router::build_ops_router(self.state))
            .with_graceful_shutdown(async move { ops_stop.cancelled().await });

        let rpc = async { rpc.await.map_err(|e| FeatherError::Transport(format!("rpc server failed: {e}"))) };
        let ops = async { ops.await.map_err(|e| FeatherError::Transport(format!("ops server failed: {e}"))) };

        let res = tokio::try_join!(rpc, ops).map(|_| ());
        // One listener failing takes the other down too.
        stop.cancel();
        tracing::info!("ingest server stopped");
        res
    }
}

/// Resolves on Ctrl+C (and SIGTERM on unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
