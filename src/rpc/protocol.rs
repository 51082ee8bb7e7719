//! Wire types for the peer-to-peer replication channel.
//!
//! Four unary methods and a shared status vocabulary, carried as small
//! JSON-over-HTTP messages rather than a binary RPC framing.

use serde::{Deserialize, Serialize};

use crate::graph::{NodeId, Status};

/// Status values actually exchanged on the wire. `RPC_FAILED` is never
/// sent; it is synthesized locally by the caller on transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireStatus {
    Success,
    Exists,
    NotFound,
    Error,
}

impl From<Status> for WireStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => WireStatus::Success,
            Status::Exists => WireStatus::Exists,
            Status::NotFound => WireStatus::NotFound,
            Status::Error => WireStatus::Error,
        }
    }
}

impl From<WireStatus> for Status {
    fn from(status: WireStatus) -> Self {
        match status {
            WireStatus::Success => Status::Success,
            WireStatus::Exists => Status::Exists,
            WireStatus::NotFound => Status::NotFound,
            WireStatus::Error => Status::Error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeRequest {
    pub node_id: NodeId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub node_a_id: NodeId,
    pub node_b_id: NodeId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub status: WireStatus,
}
