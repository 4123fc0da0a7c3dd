//! Error types for pipecheck-api

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ErrorStatusPolicy;

/// Result type alias for pipecheck-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pipecheck-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from pipecheck-core
    #[error("{0}")]
    Core(#[from] pipecheck_core::Error),

    /// The request body could not be read (e.g. it exceeds the size limit)
    #[error("Request body rejected: {0}")]
    Body(#[from] BytesRejection),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (config files, sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Core(e) => e.is_client_error(),
            Error::Body(_) => true,
            Error::Config { .. } | Error::Io(_) => false,
        }
    }

    /// Renders the error as a `{error, status: "error"}` response.
    ///
    /// Unreadable bodies keep the status axum assigned (413 for an
    /// oversized body). Other client errors use the transport status chosen
    /// by `policy`; anything else is a 500.
    pub fn into_response_with(self, policy: ErrorStatusPolicy) -> Response {
        let status = if let Error::Body(rejection) = &self {
            rejection.status()
        } else if self.is_client_error() {
            policy.client_error_status()
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_response_with(ErrorStatusPolicy::default())
    }
}

/// Failure payload returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
    /// Always `"error"`.
    pub status: String,
}

impl ErrorResponse {
    /// Builds a failure payload with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: "error".to_string(),
        }
    }
}
