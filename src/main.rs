//! Process glue: argument parsing, logging init, launching the RPC server
//! and HTTP front-end.

use std::sync::Arc;

use graph_server::{config::Config, context::PeerContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::parse_args()?;
    tracing::info!(
        target: "graph_server",
        http_port = config.http_port,
        part = config.part + 1,
        rpc_port = config.rpc_port(),
        peers = ?config.peers,
        "starting partitioned graph server"
    );

    let ctx = Arc::new(PeerContext::new(config));
    graph_server::serve(ctx).await
}
