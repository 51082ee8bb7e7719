//! Partitioned in-memory graph service.
//!
//! `main.rs` is the process-glue layer (argument parsing, logging init,
//! launching the two listeners); everything else lives here so
//! integration tests can drive the HTTP/RPC routers in-process without
//! binding real sockets.

pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod http;
pub mod partition;
pub mod rpc;

use std::sync::Arc;

use context::PeerContext;

/// Binds both listeners for `ctx` and serves until either task exits.
pub async fn serve(ctx: Arc<PeerContext>) -> anyhow::Result<()> {
    let http_listener = tokio::net::TcpListener::bind(("0.0.0.0", ctx.config.http_port)).await?;
    let rpc_listener = tokio::net::TcpListener::bind(("0.0.0.0", ctx.config.rpc_port())).await?;

    let http_server = axum::serve(http_listener, http::router(ctx.clone()));
    let rpc_server = axum::serve(rpc_listener, rpc::server::router(ctx.clone()));

    tracing::info!(target: "graph_server", "http and rpc listeners bound, serving");

    tokio::try_join!(
        async { http_server.await.map_err(anyhow::Error::from) },
        async { rpc_server.await.map_err(anyhow::Error::from) },
    )?;

    Ok(())
}
