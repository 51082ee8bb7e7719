//! End-to-end HTTP tests exercised against real RPC listeners (so
//! cross-partition replication genuinely crosses the network) with the
//! HTTP side driven in-process via `tower::ServiceExt`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use graph_server::config::{Config, PeerEndpoint};
use graph_server::context::PeerContext;

fn peer(port: u16) -> PeerEndpoint {
    PeerEndpoint { host: "127.0.0.1".to_string(), port }
}

async fn post(
    router: axum::Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Builds a live two-peer cluster: A owns partition 0, B owns partition
/// 1. Partition 2 is unused by these tests and gets a placeholder
/// endpoint that is never dialed.
async fn two_peer_cluster() -> (Arc<PeerContext>, Arc<PeerContext>) {
    // Bind RPC sockets first so both configs can reference each other's
    // real ports.
    let a_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let a_port = a_listener.local_addr().unwrap().port();
    let b_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let b_port = b_listener.local_addr().unwrap().port();

    let peers = [peer(a_port), peer(b_port), peer(1)];

    let a_ctx = Arc::new(PeerContext::new(Config { http_port: 0, part: 0, peers: peers.clone() }));
    let b_ctx = Arc::new(PeerContext::new(Config { http_port: 0, part: 1, peers }));

    let a_router = graph_server::rpc::server::router(a_ctx.clone());
    tokio::spawn(async move {
        axum::serve(a_listener, a_router).await.unwrap();
    });
    let b_router = graph_server::rpc::server::router(b_ctx.clone());
    tokio::spawn(async move {
        axum::serve(b_listener, b_router).await.unwrap();
    });

    (a_ctx, b_ctx)
}

#[tokio::test]
async fn add_node_then_get_node_reports_present() {
    let ctx = Arc::new(PeerContext::new(Config {
        http_port: 0,
        part: 0,
        peers: [peer(1), peer(2), peer(3)],
    }));

    let (status, _) =
        post(graph_server::http::router(ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        post(graph_server::http::router(ctx), "/api/v1/get_node", serde_json::json!({"node_id": 3})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["in_graph"], true);
}

#[tokio::test]
async fn add_node_is_idempotent_with_204() {
    let ctx = Arc::new(PeerContext::new(Config {
        http_port: 0,
        part: 0,
        peers: [peer(1), peer(2), peer(3)],
    }));

    let (status, _) =
        post(graph_server::http::router(ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        post(graph_server::http::router(ctx), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn cross_partition_edge_replicates_to_both_peers() {
    let (a_ctx, b_ctx) = two_peer_cluster().await;

    post(graph_server::http::router(a_ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;
    post(graph_server::http::router(b_ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 4})).await;

    let (status, _) = post(
        graph_server::http::router(a_ctx.clone()),
        "/api/v1/add_edge",
        serde_json::json!({"node_a_id": 3, "node_b_id": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post(
        graph_server::http::router(a_ctx),
        "/api/v1/get_edge",
        serde_json::json!({"node_a_id": 3, "node_b_id": 4}),
    )
    .await;
    assert_eq!(body["in_graph"], true);

    let (_, body) = post(
        graph_server::http::router(b_ctx),
        "/api/v1/get_edge",
        serde_json::json!({"node_a_id": 3, "node_b_id": 4}),
    )
    .await;
    assert_eq!(body["in_graph"], true);
}

#[tokio::test]
async fn add_edge_sent_to_higher_partition_peer_is_rejected() {
    let (a_ctx, b_ctx) = two_peer_cluster().await;

    post(graph_server::http::router(a_ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;
    post(graph_server::http::router(b_ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 4})).await;

    let (status, _) = post(
        graph_server::http::router(b_ctx),
        "/api/v1/add_edge",
        serde_json::json!({"node_a_id": 3, "node_b_id": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_edge_without_local_endpoint_rejects_without_rpc() {
    let (a_ctx, b_ctx) = two_peer_cluster().await;

    // Node 3 (partition 0, owned by A) was never added locally.
    post(graph_server::http::router(b_ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 4})).await;

    let (status, _) = post(
        graph_server::http::router(a_ctx),
        "/api/v1/add_edge",
        serde_json::json!({"node_a_id": 3, "node_b_id": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No RPC was issued: B never grew a placeholder for node 3.
    let (_, body) =
        post(graph_server::http::router(b_ctx), "/api/v1/get_node", serde_json::json!({"node_id": 3})).await;
    assert_eq!(body["in_graph"], false);
}

#[tokio::test]
async fn shortest_path_between_adjacent_nodes_is_one() {
    let ctx = Arc::new(PeerContext::new(Config {
        http_port: 0,
        part: 0,
        peers: [peer(1), peer(2), peer(3)],
    }));

    post(graph_server::http::router(ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;
    post(graph_server::http::router(ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 6})).await;
    post(
        graph_server::http::router(ctx.clone()),
        "/api/v1/add_edge",
        serde_json::json!({"node_a_id": 3, "node_b_id": 6}),
    )
    .await;

    let (status, body) = post(
        graph_server::http::router(ctx),
        "/api/v1/shortest_path",
        serde_json::json!({"node_a_id": 3, "node_b_id": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance"], "1");
}

#[tokio::test]
async fn shortest_path_to_unknown_node_is_404() {
    let ctx = Arc::new(PeerContext::new(Config {
        http_port: 0,
        part: 0,
        peers: [peer(1), peer(2), peer(3)],
    }));

    post(graph_server::http::router(ctx.clone()), "/api/v1/add_node", serde_json::json!({"node_id": 3})).await;

    let (status, _) = post(
        graph_server::http::router(ctx),
        "/api/v1/shortest_path",
        serde_json::json!({"node_a_id": 3, "node_b_id": 9999}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_body_is_400() {
    let ctx = Arc::new(PeerContext::new(Config {
        http_port: 0,
        part: 0,
        peers: [peer(1), peer(2), peer(3)],
    }));

    let resp = graph_server::http::router(ctx)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/add_node")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_field_is_400() {
    let ctx = Arc::new(PeerContext::new(Config {
        http_port: 0,
        part: 0,
        peers: [peer(1), peer(2), peer(3)],
    }));

    let (status, _) = post(graph_server::http::router(ctx), "/api/v1/add_node", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
