//! DAG validation for pipeline graphs.
//!
//! Cycle detection is a three-color depth-first walk: every id moves from
//! unvisited to `exploring` (on the current path) to `done` (proven free of
//! reachable cycles). Reaching an id that is still `exploring` means a back
//! edge, i.e. a cycle.
//!
//! The walk runs on an explicit stack of `(id, next target position)`
//! frames, so arbitrarily long chains cannot exhaust the call stack.
//! Each id is fully explored at most once, giving O(V + E).

use crate::{Edge, Node, PipelineGraph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Result types
// ============================================================================

/// Size metrics and acyclicity for one submitted graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagReport {
    /// Length of the submitted node list (not deduplicated).
    pub node_count: usize,
    /// Length of the submitted edge list (not deduplicated).
    pub edge_count: usize,
    /// Whether no directed cycle is reachable from the listed nodes.
    pub is_dag: bool,
}

// ============================================================================
// Adjacency
// ============================================================================

/// Lookup from a node id to the ids it points to, in edge order.
///
/// Keyed by id, so duplicate node entries share one adjacency list and
/// repeated edges keep every target occurrence.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyMap<'a> {
    targets: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> AdjacencyMap<'a> {
    /// Builds the mapping with a single pass over `edges`.
    pub fn from_edges(edges: &'a [Edge]) -> Self {
        let mut targets: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for edge in edges {
            targets
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
        Self { targets }
    }

    /// Outgoing targets of `id`; empty for ids with no outgoing edges.
    pub fn targets(&self, id: &str) -> &[&'a str] {
        self.targets.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ============================================================================
// Walk
// ============================================================================

/// One level of the depth-first path: an id and the index of the next
/// target to follow.
struct Frame<'a> {
    id: &'a str,
    next: usize,
}

/// Marker sets and work stack shared across the roots of one validation.
struct Walk<'g, 'a> {
    adjacency: &'g AdjacencyMap<'a>,
    exploring: HashSet<&'a str>,
    done: HashSet<&'a str>,
    stack: Vec<Frame<'a>>,
}

impl<'g, 'a> Walk<'g, 'a> {
    fn new(adjacency: &'g AdjacencyMap<'a>) -> Self {
        Self {
            adjacency,
            exploring: HashSet::new(),
            done: HashSet::new(),
            stack: Vec::new(),
        }
    }

    /// Explores everything reachable from `root`.
    ///
    /// Returns `false` as soon as a back edge is found.
    fn visit(&mut self, root: &'a str) -> bool {
        if self.done.contains(root) {
            return true;
        }

        self.exploring.insert(root);
        self.stack.push(Frame { id: root, next: 0 });

        while let Some(frame) = self.stack.last_mut() {
            let id = frame.id;
            match self.adjacency.targets(id).get(frame.next) {
                Some(&target) => {
                    frame.next += 1;

                    if self.exploring.contains(target) {
                        log::debug!("Cycle detected: back edge {id} -> {target}");
                        self.stack.clear();
                        return false;
                    }
                    if self.done.contains(target) {
                        continue;
                    }

                    self.exploring.insert(target);
                    self.stack.push(Frame {
                        id: target,
                        next: 0,
                    });
                }
                None => {
                    self.stack.pop();
                    self.exploring.remove(id);
                    self.done.insert(id);
                }
            }
        }

        true
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Returns whether the graph formed by `edges` has no cycle reachable from
/// any id in `nodes`.
///
/// Roots are taken from `nodes` in list order. Ids that only appear as
/// edge endpoints are still explored when the walk reaches them. Never
/// fails: dangling references simply have no outgoing edges.
pub fn is_dag<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> bool {
    let adjacency = AdjacencyMap::from_edges(edges);
    let mut walk = Walk::new(&adjacency);
    nodes.iter().all(|node| walk.visit(node.id.as_str()))
}

/// Validates a pipeline graph, reporting raw counts and acyclicity.
pub fn validate(graph: &PipelineGraph) -> DagReport {
    let report = DagReport {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        is_dag: is_dag(&graph.nodes, &graph.edges),
    };

    log::debug!(
        "Validated pipeline: {} nodes, {} edges, is_dag={}",
        report.node_count,
        report.edge_count,
        report.is_dag
    );

    report
}

// ============================================================================
// Tests
// ============================================================================
