//! `POST /pipelines/parse` behavior through the assembled router.

use axum::http::StatusCode;
use pipecheck_api::{ErrorStatusPolicy, ServerConfig};
use serde_json::json;

use crate::common::{default_router, get, post_pipeline, router_with};

// ----------------------------------------------------------------------------
// Success cases
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_chain_is_dag() {
    let body = json!({
        "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C"}],
        "edges": [{"source": "A", "target": "B"}, {"source": "B", "target": "C"}]
    });
    let response = post_pipeline(default_router(), body.to_string()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"num_nodes": 3, "num_edges": 2, "is_dag": true, "status": "success"})
    );
}

#[tokio::test]
async fn test_two_cycle_is_not_dag() {
    let body = json!({
        "nodes": [{"id": "A"}, {"id": "B"}],
        "edges": [{"source": "A", "target": "B"}, {"source": "B", "target": "A"}]
    });
    let response = post_pipeline(default_router(), body.to_string()).await;

    assert_eq!(
        response.json(),
        json!({"num_nodes": 2, "num_edges": 2, "is_dag": false, "status": "success"})
    );
}

#[tokio::test]
async fn test_empty_lists() {
    let body = json!({"nodes": [], "edges": []});
    let response = post_pipeline(default_router(), body.to_string()).await;

    assert_eq!(
        response.json(),
        json!({"num_nodes": 0, "num_edges": 0, "is_dag": true, "status": "success"})
    );
}

#[tokio::test]
async fn test_missing_lists_default_to_empty() {
    let response = post_pipeline(default_router(), "{}").await;

    let value = response.json();
    assert_eq!(value["num_nodes"], 0);
    assert_eq!(value["num_edges"], 0);
    assert_eq!(value["is_dag"], true);
}

#[tokio::test]
async fn test_self_loop() {
    let body = json!({
        "nodes": [{"id": "A"}],
        "edges": [{"source": "A", "target": "A"}]
    });
    let response = post_pipeline(default_router(), body.to_string()).await;
    assert_eq!(response.json()["is_dag"], false);
}

#[tokio::test]
async fn test_cycle_through_node_missing_from_list() {
    let body = json!({
        "nodes": [{"id": "A"}],
        "edges": [{"source": "A", "target": "B"}, {"source": "B", "target": "A"}]
    });
    let response = post_pipeline(default_router(), body.to_string()).await;

    let value = response.json();
    assert_eq!(value["num_nodes"], 1);
    assert_eq!(value["is_dag"], false);
}

#[tokio::test]
async fn test_frontend_shaped_payload() {
    // Nodes and edges as a flow editor sends them, extra fields included.
    let body = json!({
        "nodes": [
            {"id": "customInput-1", "type": "customInput", "position": {"x": 10, "y": 20},
             "data": {"id": "customInput-1", "nodeType": "customInput"}},
            {"id": "llm-1", "type": "llm", "position": {"x": 200, "y": 20}, "data": {}}
        ],
        "edges": [
            {"id": "e1", "source": "customInput-1", "sourceHandle": "customInput-1-value",
             "target": "llm-1", "targetHandle": "llm-1-prompt", "type": "smoothstep",
             "animated": true, "markerEnd": {"type": "arrow"}}
        ]
    });
    let response = post_pipeline(default_router(), body.to_string()).await;

    assert_eq!(
        response.json(),
        json!({"num_nodes": 2, "num_edges": 1, "is_dag": true, "status": "success"})
    );
}

#[tokio::test]
async fn test_duplicates_are_counted() {
    let body = json!({
        "nodes": [{"id": "A"}, {"id": "A"}],
        "edges": [{"source": "A", "target": "B"}, {"source": "A", "target": "B"}]
    });
    let response = post_pipeline(default_router(), body.to_string()).await;

    let value = response.json();
    assert_eq!(value["num_nodes"], 2);
    assert_eq!(value["num_edges"], 2);
    assert_eq!(value["is_dag"], true);
}

// ----------------------------------------------------------------------------
// Malformed input
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_non_object_body_preserve_policy() {
    let response = post_pipeline(default_router(), "[1, 2, 3]").await;

    assert_eq!(response.status, StatusCode::OK);
    let value = response.json();
    assert_eq!(value["status"], "error");
    assert_eq!(
        value["error"],
        "Malformed input: expected a JSON object, found an array"
    );
}

#[tokio::test]
async fn test_invalid_json_body() {
    let response = post_pipeline(default_router(), "{\"nodes\": [").await;

    assert_eq!(response.status, StatusCode::OK);
    let value = response.json();
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn test_non_array_nodes() {
    let response = post_pipeline(default_router(), r#"{"nodes": "A,B"}"#).await;

    let value = response.json();
    assert_eq!(value["status"], "error");
    assert!(value.get("num_nodes").is_none());
}

#[tokio::test]
async fn test_node_without_id() {
    let response = post_pipeline(default_router(), r#"{"nodes": [{"label": "x"}]}"#).await;

    let value = response.json();
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("nodes[0]"));
}

#[tokio::test]
async fn test_client_error_policy_returns_400() {
    let config = ServerConfig {
        error_status: ErrorStatusPolicy::ClientError,
        ..Default::default()
    };
    let response = post_pipeline(router_with(config), "\"just a string\"").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["status"], "error");
}

#[tokio::test]
async fn test_body_over_limit_is_rejected() {
    let config = ServerConfig {
        max_body_bytes: 64,
        ..Default::default()
    };
    let nodes: Vec<_> = (0..100).map(|i| json!({"id": format!("n{i}")})).collect();
    let body = json!({"nodes": nodes}).to_string();

    let response = post_pipeline(router_with(config), body).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);

    let value = response.json();
    assert_eq!(value["status"], "error");
    assert!(value["error"].is_string());
    assert_eq!(value.as_object().unwrap().len(), 2);
}

// ----------------------------------------------------------------------------
// Other routes
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_root_greeting() {
    let response = get(default_router(), "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"message": "Hello from backend!"}));
}

#[tokio::test]
async fn test_health() {
    let response = get(default_router(), "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let value = response.json();
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["name"], "pipecheck");
}

#[tokio::test]
async fn test_get_on_parse_not_allowed() {
    let response = get(default_router(), "/pipelines/parse").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route() {
    let response = get(default_router(), "/pipelines").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
