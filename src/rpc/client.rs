//! Outbound RPC calls to peers for edge replication.
//!
//! Stateless beyond the pooled `reqwest::Client`; each call blocks the
//! calling handler until the RPC returns or fails. No retry, no circuit
//! breaker.

use thiserror::Error;

use crate::config::PeerEndpoint;
use crate::rpc::protocol::{Ack, EdgeRequest, WireStatus};

#[derive(Debug, Error)]
pub enum RpcTransportError {
    #[error("connection to peer failed: {0}")]
    Connect(#[from] reqwest::Error),
}

pub struct ReplicationClient {
    http: reqwest::Client,
}

impl ReplicationClient {
    pub fn new() -> Self {
        Self { http: reqwest::Client::new() }
    }

    fn rpc_url(peer: &PeerEndpoint, path: &str) -> String {
        format!("http://{}:{}{}", peer.host, peer.port, path)
    }

    async fn call_edge(
        &self,
        peer: &PeerEndpoint,
        path: &str,
        node_a_id: u64,
        node_b_id: u64,
    ) -> Result<WireStatus, RpcTransportError> {
        let ack = self
            .http
            .post(Self::rpc_url(peer, path))
            .json(&EdgeRequest { node_a_id, node_b_id })
            .send()
            .await?
            .error_for_status()?
            .json::<Ack>()
            .await?;
        Ok(ack.status)
    }

    /// Replicates `ADD_EDGE(lo, hi)` to the peer owning `hi`.
    pub async fn add_edge(
        &self,
        peer: &PeerEndpoint,
        lo: u64,
        hi: u64,
    ) -> Result<WireStatus, RpcTransportError> {
        self.call_edge(peer, "/rpc/add_edge", lo, hi).await
    }

    /// Replicates `REMOVE_EDGE(lo, hi)` to the peer owning `hi`.
    pub async fn remove_edge(
        &self,
        peer: &PeerEndpoint,
        lo: u64,
        hi: u64,
    ) -> Result<WireStatus, RpcTransportError> {
        self.call_edge(peer, "/rpc/remove_edge", lo, hi).await
    }
}

impl Default for ReplicationClient {
    fn default() -> Self {
        Self::new()
    }
}
