//! Shared per-peer state, passed explicitly to every handler rather than
//! held in module-level globals.

use tokio::sync::Mutex;

use crate::config::Config;
use crate::graph::Graph;
use crate::rpc::client::ReplicationClient;

/// The graph store is the sole shared mutable object. Cross-partition
/// handlers hold this lock across the outbound replication RPC, an
/// `.await` point, so an async-aware mutex is required: holding a
/// synchronous guard across an `.await` can stall the executor thread it
/// was acquired on, and under a multi-threaded runtime it may not even be
/// safe to hold across a `Send` boundary. See DESIGN.md for the tradeoff
/// against releasing the lock for the RPC's duration.
pub struct PeerContext {
    pub graph: Mutex<Graph>,
    pub config: Config,
    pub rpc_client: ReplicationClient,
}

impl PeerContext {
    pub fn new(config: Config) -> Self {
        Self { graph: Mutex::new(Graph::new()), config, rpc_client: ReplicationClient::new() }
    }
}
