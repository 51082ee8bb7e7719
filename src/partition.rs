//! Partition ownership rules for cross-partition edge operations.

use crate::graph::NodeId;

pub const NUM_PARTITIONS: u8 = 3;

/// `node_id mod 3`, stored as the 0-based partition index used throughout
/// this crate (the CLI surface stays 1-based, see `Config::from_cli`).
pub fn partition_of(id: NodeId) -> u8 {
    (id % NUM_PARTITIONS as u64) as u8
}

/// How a peer owning partition `part` should handle a two-endpoint
/// mutation/query for `(a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Both endpoints belong to this partition: operate on the local
    /// graph directly.
    BothLocal,
    /// Neither endpoint belongs to this partition: the client routed to
    /// the wrong peer.
    RejectNeitherLocal,
    /// Exactly one endpoint is local, but it is the higher-indexed
    /// (`hi`) partition: the client must send this op to the lower
    /// partition instead.
    RejectWrongPeer,
    /// Exactly one endpoint is local and it is the lower-indexed (`lo`)
    /// partition: this peer owns the replication flow. `local_id` is the
    /// endpoint this peer owns; `remote_id` is the `hi` endpoint owned by
    /// the peer to replicate to.
    ReplicateAsLower { local_id: NodeId, remote_id: NodeId },
}

/// Classifies a two-endpoint request against this peer's partition: both
/// local, neither local, or exactly one local (split further into whether
/// this peer owns the lower or higher partition of the pair).
pub fn classify(part: u8, a: NodeId, b: NodeId) -> Routing {
    let pa = partition_of(a);
    let pb = partition_of(b);

    if pa != part && pb != part {
        return Routing::RejectNeitherLocal;
    }
    if pa == part && pb == part {
        return Routing::BothLocal;
    }

    let (lo_id, lo_part, hi_id, hi_part) = if pa < pb { (a, pa, b, pb) } else { (b, pb, a, pa) };

    if hi_part == part {
        debug_assert_eq!(lo_part, if lo_id == a { pa } else { pb });
        Routing::RejectWrongPeer
    } else {
        Routing::ReplicateAsLower { local_id: lo_id, remote_id: hi_id }
    }
}
