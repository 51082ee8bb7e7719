//! In-memory undirected graph store.
//!
//! Neighbor sets preserve insertion order, which `get_neighbors` depends
//! on.

use std::collections::{HashMap, HashSet};

pub type NodeId = u64;

/// Status shared by every graph mutation/query, matching the vocabulary
/// exchanged between peers over RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Exists,
    NotFound,
    Error,
}

/// Ordered, duplicate-free set of neighbor ids. Keeps `order` for
/// `get_neighbors` and `members` for O(1) membership checks.
#[derive(Default, Debug, Clone)]
struct NeighborSet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl NeighborSet {
    fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Inserts `id` at the end if not already present. Returns whether it
    /// was newly inserted.
    fn insert(&mut self, id: NodeId) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, id: NodeId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|&x| x != id);
            true
        } else {
            false
        }
    }
}

/// A node's local record. `placeholder` marks a node this peer does not
/// own, held only to satisfy a cross-partition edge.
#[derive(Default, Debug, Clone)]
struct NodeRecord {
    neighbors: NeighborSet,
    placeholder: bool,
}

/// The local subgraph held by one peer.
#[derive(Default)]
pub struct Graph {
    nodes: HashMap<NodeId, NodeRecord>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId) -> Status {
        self.add_node_inner(id, false)
    }

    /// Inserts `id` as a non-owned placeholder if absent; does nothing if
    /// it already exists (owned or not). Used by the replication paths.
    pub fn ensure_placeholder(&mut self, id: NodeId) {
        self.nodes.entry(id).or_insert_with(|| NodeRecord { neighbors: NeighborSet::default(), placeholder: true });
    }

    fn add_node_inner(&mut self, id: NodeId, placeholder: bool) -> Status {
        if self.nodes.contains_key(&id) {
            return Status::Exists;
        }
        self.nodes.insert(id, NodeRecord { neighbors: NeighborSet::default(), placeholder });
        Status::Success
    }

    pub fn remove_node(&mut self, id: NodeId) -> Status {
        let record = match self.nodes.remove(&id) {
            Some(r) => r,
            None => return Status::NotFound,
        };
        for &neighbor in &record.neighbors.order {
            if let Some(n) = self.nodes.get_mut(&neighbor) {
                n.neighbors.remove(id);
            }
        }
        Status::Success
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Status {
        if a == b {
            return Status::Error;
        }
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return Status::NotFound;
        }
        let a_has_b = self.nodes.get(&a).map_or(false, |n| n.neighbors.contains(b));
        if a_has_b {
            return Status::Exists;
        }
        self.nodes.get_mut(&a).unwrap().neighbors.insert(b);
        // Insert the reverse edge only if b is locally present; the caller
        // is responsible for the other direction otherwise.
        if let Some(b_rec) = self.nodes.get_mut(&b) {
            b_rec.neighbors.insert(a);
        }
        Status::Success
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Status {
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return Status::NotFound;
        }
        let a_had = self.nodes.get_mut(&a).unwrap().neighbors.remove(b);
        let b_had = self.nodes.get_mut(&b).unwrap().neighbors.remove(a);
        if a_had || b_had {
            Status::Success
        } else {
            Status::NotFound
        }
    }

    pub fn get_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get_edge(&self, a: NodeId, b: NodeId) -> Result<bool, Status> {
        if a == b {
            return Err(Status::Error);
        }
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return Err(Status::NotFound);
        }
        let in_graph = self.nodes.get(&a).map_or(false, |n| n.neighbors.contains(b))
            || self.nodes.get(&b).map_or(false, |n| n.neighbors.contains(a));
        Ok(in_graph)
    }

    pub fn get_neighbors(&self, id: NodeId) -> Option<Vec<NodeId>> {
        self.nodes.get(&id).map(|n| n.neighbors.order.clone())
    }

    /// Unweighted BFS distance in hops. Only traverses nodes physically
    /// present on this peer, so a path that would cross back out to a
    /// neighbor this peer doesn't hold a record for is invisible to it.
    pub fn shortest_path(&self, a: NodeId, b: NodeId) -> Result<u64, Status> {
        if a == b {
            return Err(Status::Exists);
        }
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return Err(Status::NotFound);
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: std::collections::VecDeque<(NodeId, u64)> = std::collections::VecDeque::new();
        visited.insert(a);
        queue.push_back((a, 0));

        while let Some((current, dist)) = queue.pop_front() {
            if current == b {
                return Ok(dist);
            }
            if let Some(record) = self.nodes.get(&current) {
                for &neighbor in &record.neighbors.order {
                    if visited.insert(neighbor) {
                        queue.push_back((neighbor, dist + 1));
                    }
                }
            }
        }

        Err(Status::NotFound)
    }
}
