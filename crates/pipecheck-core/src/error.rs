//! Error types for pipecheck-core.

/// Errors that can occur while interpreting a pipeline graph.
///
/// Cycle detection itself is total over well-formed input, so every
/// variant here describes a problem with the submitted body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The body could not be interpreted as a pipeline graph.
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// What was wrong with the input
        message: String,
    },
}

/// Convenience `Result` type alias for pipecheck-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new malformed-input error.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Error::MalformedInput {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input (vs. an internal fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::MalformedInput { .. })
    }
}
