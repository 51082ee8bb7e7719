//! HTTP front-end handlers. One dispatcher per route, each parsing the
//! JSON body, consulting partition ownership, and dispatching to the
//! graph store and/or replication client.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::context::PeerContext;
use crate::error::{Outcome, RequestError};
use crate::graph::Status;
use crate::http::dto::{extract_edge_ids, extract_node_id, DistanceResponse, InGraphResponse, NeighborsResponse};
use crate::partition::{classify, partition_of, Routing};

/// Parses the request body as JSON. Malformed input gets a plain 400 with
/// a short plaintext body rather than a structured status payload.
fn parse_body(bytes: &Bytes) -> Result<serde_json::Value, RequestError> {
    serde_json::from_slice(bytes).map_err(|_| RequestError::MalformedJson)
}

fn request_error_response(err: RequestError) -> Response {
    tracing::debug!(target: "http", %err, "rejecting malformed request");
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

fn outcome_status_code(outcome: Outcome) -> StatusCode {
    match outcome {
        Outcome::Success => StatusCode::OK,
        Outcome::Exists => StatusCode::NO_CONTENT,
        Outcome::NotFound => StatusCode::NOT_FOUND,
        Outcome::Error => StatusCode::BAD_REQUEST,
        Outcome::RpcFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the response for a node/edge mutation: 200 echoing the request
/// body on success, otherwise a bare status code with no body.
fn mutation_response(outcome: Outcome, body: &Bytes) -> Response {
    let code = outcome_status_code(outcome);
    if outcome == Outcome::Success {
        (code, [("content-type", "application/json")], body.clone()).into_response()
    } else {
        code.into_response()
    }
}

pub async fn add_node(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let node_id = match extract_node_id(&parsed) {
        Ok(id) => id,
        Err(e) => return request_error_response(e),
    };

    let mut graph = ctx.graph.lock().await;
    let status = graph.add_node(node_id);
    tracing::debug!(target: "http", node_id, ?status, "add_node");
    mutation_response(status.into(), &body)
}

pub async fn remove_node(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let node_id = match extract_node_id(&parsed) {
        Ok(id) => id,
        Err(e) => return request_error_response(e),
    };

    let mut graph = ctx.graph.lock().await;
    let status = graph.remove_node(node_id);
    tracing::debug!(target: "http", node_id, ?status, "remove_node");
    mutation_response(status.into(), &body)
}

pub async fn get_node(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let node_id = match extract_node_id(&parsed) {
        Ok(id) => id,
        Err(e) => return request_error_response(e),
    };

    let graph = ctx.graph.lock().await;
    let in_graph = graph.get_node(node_id);
    tracing::debug!(target: "http", node_id, in_graph, "get_node");
    Json(InGraphResponse { in_graph }).into_response()
}

pub async fn get_edge(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let (a, b) = match extract_edge_ids(&parsed) {
        Ok(ids) => ids,
        Err(e) => return request_error_response(e),
    };

    let graph = ctx.graph.lock().await;
    match graph.get_edge(a, b) {
        Ok(in_graph) => Json(InGraphResponse { in_graph }).into_response(),
        Err(status) => outcome_status_code(status.into()).into_response(),
    }
}

pub async fn get_neighbors(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let node_id = match extract_node_id(&parsed) {
        Ok(id) => id,
        Err(e) => return request_error_response(e),
    };

    let graph = ctx.graph.lock().await;
    match graph.get_neighbors(node_id) {
        Some(neighbors) => Json(NeighborsResponse { node_id, neighbors }).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn shortest_path(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let (a, b) = match extract_edge_ids(&parsed) {
        Ok(ids) => ids,
        Err(e) => return request_error_response(e),
    };

    let graph = ctx.graph.lock().await;
    match graph.shortest_path(a, b) {
        Ok(distance) => Json(DistanceResponse { distance: distance.to_string() }).into_response(),
        Err(status) => outcome_status_code(status.into()).into_response(),
    }
}

pub async fn add_edge(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let (a, b) = match extract_edge_ids(&parsed) {
        Ok(ids) => ids,
        Err(e) => return request_error_response(e),
    };

    match classify(ctx.config.part, a, b) {
        Routing::RejectNeitherLocal | Routing::RejectWrongPeer => {
            tracing::debug!(target: "http", a, b, "add_edge: wrong partition");
            StatusCode::BAD_REQUEST.into_response()
        }
        Routing::BothLocal => {
            let mut graph = ctx.graph.lock().await;
            let status = graph.add_edge(a, b);
            tracing::debug!(target: "http", a, b, ?status, "add_edge: both local");
            mutation_response(status.into(), &body)
        }
        Routing::ReplicateAsLower { local_id, remote_id } => {
            // Held across the outbound RPC: the lower peer serializes
            // the whole cross-partition operation, not just its local half.
            let mut graph = ctx.graph.lock().await;

            if !graph.get_node(local_id) {
                tracing::debug!(target: "http", local_id, "add_edge: lo endpoint missing, no RPC issued");
                return StatusCode::BAD_REQUEST.into_response();
            }

            let hi_partition = partition_of(remote_id);
            let peer = ctx.config.peer(hi_partition);
            match ctx.rpc_client.add_edge(peer, local_id, remote_id).await {
                Err(e) => {
                    tracing::warn!(target: "http", %e, "add_edge: rpc to hi peer failed");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
                Ok(remote_status) => {
                    let remote_status: Status = remote_status.into();
                    if remote_status == Status::Success {
                        graph.ensure_placeholder(remote_id);
                        let status = graph.add_edge(local_id, remote_id);
                        tracing::debug!(target: "http", local_id, remote_id, ?status, "add_edge: applied locally after replication");
                        mutation_response(status.into(), &body)
                    } else {
                        tracing::debug!(target: "http", local_id, remote_id, ?remote_status, "add_edge: propagating remote status");
                        outcome_status_code(remote_status.into()).into_response()
                    }
                }
            }
        }
    }
}

pub async fn remove_edge(State(ctx): State<Arc<PeerContext>>, body: Bytes) -> Response {
    let parsed = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return request_error_response(e),
    };
    let (a, b) = match extract_edge_ids(&parsed) {
        Ok(ids) => ids,
        Err(e) => return request_error_response(e),
    };

    match classify(ctx.config.part, a, b) {
        Routing::RejectNeitherLocal | Routing::RejectWrongPeer => {
            tracing::debug!(target: "http", a, b, "remove_edge: wrong partition");
            StatusCode::BAD_REQUEST.into_response()
        }
        Routing::BothLocal => {
            let mut graph = ctx.graph.lock().await;
            let status = graph.remove_edge(a, b);
            tracing::debug!(target: "http", a, b, ?status, "remove_edge: both local");
            mutation_response(status.into(), &body)
        }
        Routing::ReplicateAsLower { local_id, remote_id } => {
            let mut graph = ctx.graph.lock().await;

            if !graph.get_node(local_id) {
                tracing::debug!(target: "http", local_id, "remove_edge: lo endpoint missing, no RPC issued");
                return StatusCode::BAD_REQUEST.into_response();
            }

            let hi_partition = partition_of(remote_id);
            let peer = ctx.config.peer(hi_partition);
            match ctx.rpc_client.remove_edge(peer, local_id, remote_id).await {
                Err(e) => {
                    tracing::warn!(target: "http", %e, "remove_edge: rpc to hi peer failed");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
                Ok(_remote_status) => {
                    // Unlike add_edge, the local removal is applied
                    // unconditionally once the RPC round-trips, regardless
                    // of the remote status.
                    let status = graph.remove_edge(local_id, remote_id);
                    tracing::debug!(target: "http", local_id, remote_id, ?status, "remove_edge: applied locally after replication");
                    mutation_response(status.into(), &body)
                }
            }
        }
    }
}
