//! # pipecheck-api
//!
//! HTTP API server for Pipecheck.
//!
//! This crate is the transport layer around [`pipecheck_core`]:
//! - `POST /pipelines/parse` validates a submitted pipeline graph
//! - `GET /` and `GET /health` answer liveness checks
//! - configurable CORS, request tracing and body limits
//! - TOML configuration with command-line and environment overrides
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ cli     — Args → ServerConfig overrides          │
//! │ config  — ServerConfig, CorsConfig, policies     │
//! ├──────────────────────────────────────────────────┤
//! │ server  — Router assembly, CORS/trace, serve     │
//! │ routes  — handlers and response payloads         │
//! ├──────────────────────────────────────────────────┤
//! │ error   — Error → {error, status: "error"}       │
//! └──────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::{CorsConfig, ErrorStatusPolicy, ServerConfig};
pub use error::{Error, Result};
pub use routes::{AppState, HealthResponse, ParseResponse};
pub use server::{build_router, serve, serve_on};
