//! JSON request/response shapes for the HTTP front-end.

use serde::Serialize;

use crate::error::RequestError;
use crate::graph::NodeId;

/// Pulls `node_id` out of a parsed JSON body.
pub fn extract_node_id(body: &serde_json::Value) -> Result<NodeId, RequestError> {
    body.get("node_id")
        .and_then(|v| v.as_u64())
        .ok_or(RequestError::MissingField("node_id"))
}

/// Pulls `node_a_id` and `node_b_id` out of a parsed JSON body.
pub fn extract_edge_ids(body: &serde_json::Value) -> Result<(NodeId, NodeId), RequestError> {
    let a = body
        .get("node_a_id")
        .and_then(|v| v.as_u64())
        .ok_or(RequestError::MissingField("node_a_id"))?;
    let b = body
        .get("node_b_id")
        .and_then(|v| v.as_u64())
        .ok_or(RequestError::MissingField("node_b_id"))?;
    Ok((a, b))
}

#[derive(Debug, Serialize)]
pub struct InGraphResponse {
    pub in_graph: bool,
}

#[derive(Debug, Serialize)]
pub struct NeighborsResponse {
    pub node_id: NodeId,
    pub neighbors: Vec<NodeId>,
}

/// Distance is rendered as a quoted decimal string rather than a JSON
/// number, matching what clients of this API already expect.
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance: String,
}
