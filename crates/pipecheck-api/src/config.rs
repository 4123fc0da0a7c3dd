//! Server configuration.
//!
//! Configuration is read from an optional TOML file; every field has a
//! default, so an empty file (or no file) yields a working server.
//!
//! ```toml
//! bind = "0.0.0.0:8000"
//! error_status = "client_error"
//! max_body_bytes = 1048576
//! log_filter = "info,pipecheck_core=debug"
//!
//! [cors]
//! allowed_origins = ["https://pipelines.example.com"]
//! allow_credentials = true
//! ```

use axum::http::{HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::{Error, Result};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Default request-body limit (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Origin wildcard accepted in `cors.allowed_origins`.
pub const ANY_ORIGIN: &str = "*";

// ============================================================================
// ErrorStatusPolicy
// ============================================================================

/// Transport status used when a request body is malformed.
///
/// The body always carries `{error, status: "error"}`; this only picks the
/// HTTP status code that accompanies it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ErrorStatusPolicy {
    /// Answer with 200 OK; clients inspect the `status` field.
    #[default]
    Preserve,
    /// Answer with 400 Bad Request.
    ClientError,
}

impl ErrorStatusPolicy {
    /// HTTP status for a malformed-input failure under this policy.
    pub fn client_error_status(self) -> StatusCode {
        match self {
            Self::Preserve => StatusCode::OK,
            Self::ClientError => StatusCode::BAD_REQUEST,
        }
    }
}

// ============================================================================
// CorsConfig
// ============================================================================

/// Cross-origin access settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Origins allowed to call the API. `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    /// Whether browsers may send credentials with cross-origin requests.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![ANY_ORIGIN.to_string()],
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Whether the wildcard origin is configured.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o.trim() == ANY_ORIGIN)
    }

    /// Parses the explicit origins into header values.
    ///
    /// Fails with a configuration error on the first origin that is not a
    /// valid header value.
    pub fn origin_header_values(&self) -> Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| *origin != ANY_ORIGIN)
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| Error::config(format!("invalid CORS origin '{origin}': {e}")))
            })
            .collect()
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

/// Top-level Pipecheck server configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Cross-origin settings.
    pub cors: CorsConfig,
    /// Transport status for malformed request bodies.
    pub error_status: ErrorStatusPolicy,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            cors: CorsConfig::default(),
            error_status: ErrorStatusPolicy::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from `path`, or returns defaults when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Parses `bind` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| Error::config(format!("invalid bind address '{}': {e}", self.bind)))
    }

    /// Checks every field that can only be validated after parsing.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        self.cors.origin_header_values()?;
        if self.max_body_bytes == 0 {
            return Err(Error::config("max_body_bytes must be greater than zero"));
        }
        Ok(())
    }
}
