//! Route handlers and response payloads.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pipecheck_core::{DagReport, PipelineGraph, validate};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::Error;
use crate::config::{ErrorStatusPolicy, ServerConfig};

/// Server name reported by the health route.
pub const SERVER_NAME: &str = "pipecheck";

/// Immutable state shared by all handlers.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Transport status for malformed bodies.
    pub error_status: ErrorStatusPolicy,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            error_status: config.error_status,
        }
    }
}

/// Successful validation payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Length of the submitted node list.
    pub num_nodes: usize,
    /// Length of the submitted edge list.
    pub num_edges: usize,
    /// Whether the pipeline is acyclic.
    pub is_dag: bool,
    /// Always `"success"`.
    pub status: String,
}

impl From<DagReport> for ParseResponse {
    fn from(report: DagReport) -> Self {
        Self {
            num_nodes: report.node_count,
            num_edges: report.edge_count,
            is_dag: report.is_dag,
            status: "success".to_string(),
        }
    }
}

/// Health check response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

/// Routes without middleware; state is supplied by the caller.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/pipelines/parse", post(parse_pipeline))
}

/// Static greeting.
async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello from backend!" }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Validates the submitted pipeline.
///
/// The body is read raw, and body rejections are taken by the handler,
/// so every failure (oversized or invalid JSON included) produces the
/// same `{error, status: "error"}` payload.
async fn parse_pipeline(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable pipeline body");
            return Error::from(rejection).into_response_with(state.error_status);
        }
    };

    match PipelineGraph::from_json_slice(&body) {
        Ok(graph) => {
            let report = validate(&graph);
            tracing::debug!(
                nodes = report.node_count,
                edges = report.edge_count,
                is_dag = report.is_dag,
                "Pipeline validated"
            );
            Json(ParseResponse::from(report)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected pipeline body");
            Error::from(e).into_response_with(state.error_status)
        }
    }
}
