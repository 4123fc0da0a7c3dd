//! Pipeline graph types.
//!
//! A pipeline arrives as a flat list of nodes and a flat list of edges.
//! Only node ids and edge endpoints matter for validation; every other
//! field (label, position, type, ...) is carried along opaquely in
//! `attributes`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Node
// ============================================================================

/// A pipeline node, identified by an opaque string id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier. Not required to be unique within a graph.
    pub id: String,
    /// Every other field of the submitted node, uninspected.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Node {
    /// Creates a node with the given id and no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Adds an opaque attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Edge
// ============================================================================

/// A directed edge from `source` to `target`.
///
/// Endpoints are not required to name nodes present in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the node the edge leaves.
    pub source: String,
    /// Id of the node the edge enters.
    pub target: String,
    /// Every other field of the submitted edge, uninspected.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Edge {
    /// Creates an edge between two ids with no attributes.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes: Map::new(),
        }
    }

    /// Adds an opaque attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// PipelineGraph
// ============================================================================

/// The nodes and edges submitted in one request.
///
/// Transient: built per request and dropped once the report is produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineGraph {
    /// Nodes in submission order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in submission order.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl PipelineGraph {
    /// Creates a graph from node and edge lists.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Interprets raw request bytes as a pipeline graph.
    ///
    /// Fails with [`Error::MalformedInput`] when the bytes are not JSON or
    /// the JSON does not have the expected shape.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::malformed(format!("body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Interprets an already-parsed JSON value as a pipeline graph.
    ///
    /// The value must be an object. Missing `nodes` or `edges` default to
    /// empty lists; present ones must be arrays of records carrying string
    /// ids (`id` for nodes, `source` and `target` for edges).
    pub fn from_value(value: Value) -> Result<Self> {
        let mut body = match value {
            Value::Object(body) => body,
            other => {
                return Err(Error::malformed(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )));
            }
        };

        let nodes = take_records(&mut body, "nodes")?;
        let edges = take_records(&mut body, "edges")?;

        Ok(Self { nodes, edges })
    }

    /// Number of submitted nodes, duplicates included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of submitted edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Removes `field` from `body` and deserializes each array element.
fn take_records<T>(body: &mut Map<String, Value>, field: &str) -> Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let items = match body.remove(field) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::malformed(format!(
                "`{field}` must be an array, found {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| Error::malformed(format!("{field}[{index}]: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
