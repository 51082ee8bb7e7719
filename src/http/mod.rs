pub mod dto;
pub mod handlers;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::context::PeerContext;

/// Assembles the `/api/v1/*` dispatcher.
pub fn router(ctx: Arc<PeerContext>) -> Router {
    Router::new()
        .route("/api/v1/add_node", post(handlers::add_node))
        .route("/api/v1/add_edge", post(handlers::add_edge))
        .route("/api/v1/remove_node", post(handlers::remove_node))
        .route("/api/v1/remove_edge", post(handlers::remove_edge))
        .route("/api/v1/get_node", post(handlers::get_node))
        .route("/api/v1/get_edge", post(handlers::get_edge))
        .route("/api/v1/get_neighbors", post(handlers::get_neighbors))
        .route("/api/v1/shortest_path", post(handlers::shortest_path))
        .with_state(ctx)
}
