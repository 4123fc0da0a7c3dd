#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Pipecheck Core
//!
//! Pipeline graph types and the DAG validator behind the Pipecheck service.
//! This crate is transport-agnostic: it has no HTTP or async dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Nodes, edges, and request-body interpretation
//! - [`validator`]: Adjacency building and cycle detection
//!
//! # Example
//!
//! ```rust
//! use pipecheck_core::{Edge, Node, PipelineGraph, validate};
//!
//! let graph = PipelineGraph::new(
//!     vec![Node::new("A"), Node::new("B")],
//!     vec![Edge::new("A", "B"), Edge::new("B", "A")],
//! );
//! let report = validate(&graph);
//! assert_eq!(report.node_count, 2);
//! assert!(!report.is_dag);
//! ```

pub mod error;
pub mod types;
pub mod validator;

mod proptests;

// Re-exports for convenience
pub use error::{Error, Result};
pub use types::{Edge, Node, PipelineGraph};
pub use validator::{AdjacencyMap, DagReport, is_dag, validate};
