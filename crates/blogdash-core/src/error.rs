//! Error types for blogdash operations.
//!
//! One unified error type with explicit variants for transport, protocol
//! and input validation failures. Backends map their native errors into it.

use std::fmt;
use thiserror::Error;

/// The unified error type for blogdash operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport errors (connection, timeout, local IO).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol errors (non-success status, unexpected responses).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (invalid id, URL, payload).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the error is a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Timeout { .. }))
    }

    /// Returns true if the service reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.status == 404)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Protocol-level errors from service responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code (or its file-backend equivalent).
    pub status: u16,
    /// Short machine-readable error code, if known.
    pub error: Option<String>,
    /// Error message from the service.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Shorthand for a 404 with a code and message.
    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        Self::new(404, Some(error.to_string()), Some(message.into()))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid post identifier.
    #[error("invalid post id '{value}': {reason}")]
    PostId { value: String, reason: String },

    /// Invalid service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// A collection payload repeated an id.
    #[error("duplicate post id '{id}' in collection")]
    DuplicatePostId { id: String },

    /// The service returned a body that is not a post collection.
    #[error("malformed payload: {message}")]
    Payload { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
