//! Inbound RPC endpoint: applies replicated operations to the local
//! store. Runs on its own axum router, bound to this peer's RPC port.

use std::sync::Arc;

use axum::{routing::post, Json, Router};

use crate::context::PeerContext;
use crate::rpc::protocol::{Ack, EdgeRequest, NodeRequest};

pub fn router(ctx: Arc<PeerContext>) -> Router {
    Router::new()
        .route("/rpc/add_node", post(add_node))
        .route("/rpc/remove_node", post(remove_node))
        .route("/rpc/add_edge", post(add_edge))
        .route("/rpc/remove_edge", post(remove_edge))
        .with_state(ctx)
}

/// Direct application to the local store. Not exercised by the current
/// protocol's normal node-mutation path (those stay single-partition and
/// never leave the owning peer), but kept reachable for future extensions.
async fn add_node(
    axum::extract::State(ctx): axum::extract::State<Arc<PeerContext>>,
    Json(req): Json<NodeRequest>,
) -> Json<Ack> {
    let mut graph = ctx.graph.lock().await;
    let status = graph.add_node(req.node_id);
    tracing::debug!(target: "rpc", node_id = req.node_id, ?status, "rpc add_node");
    Json(Ack { status: status.into() })
}

async fn remove_node(
    axum::extract::State(ctx): axum::extract::State<Arc<PeerContext>>,
    Json(req): Json<NodeRequest>,
) -> Json<Ack> {
    let mut graph = ctx.graph.lock().await;
    let status = graph.remove_node(req.node_id);
    tracing::debug!(target: "rpc", node_id = req.node_id, ?status, "rpc remove_node");
    Json(Ack { status: status.into() })
}

/// `node_a_id` is the `lo` endpoint (owned by the caller), `node_b_id` is
/// the `hi` endpoint owned by this peer. Only creates the `lo` placeholder
/// if the `hi` endpoint already exists locally.
async fn add_edge(
    axum::extract::State(ctx): axum::extract::State<Arc<PeerContext>>,
    Json(req): Json<EdgeRequest>,
) -> Json<Ack> {
    let mut graph = ctx.graph.lock().await;
    let hi_present = graph.get_node(req.node_b_id);
    if !hi_present {
        tracing::debug!(target: "rpc", lo = req.node_a_id, hi = req.node_b_id, "rpc add_edge: hi endpoint absent");
        return Json(Ack { status: crate::graph::Status::NotFound.into() });
    }
    graph.ensure_placeholder(req.node_a_id);
    let status = graph.add_edge(req.node_a_id, req.node_b_id);
    tracing::debug!(target: "rpc", lo = req.node_a_id, hi = req.node_b_id, ?status, "rpc add_edge");
    Json(Ack { status: status.into() })
}

async fn remove_edge(
    axum::extract::State(ctx): axum::extract::State<Arc<PeerContext>>,
    Json(req): Json<EdgeRequest>,
) -> Json<Ack> {
    let mut graph = ctx.graph.lock().await;
    let status = graph.remove_edge(req.node_a_id, req.node_b_id);
    tracing::debug!(target: "rpc", lo = req.node_a_id, hi = req.node_b_id, ?status, "rpc remove_edge");
    Json(Ack { status: status.into() })
}
