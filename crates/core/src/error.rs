//! Error types for stratapack
//!
//! This module defines all error types used throughout the formatter layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Note that a failed lookup is NOT an error: resolvers report a missing
//! formatter as `None`. Only callers that need a formatter right now turn
//! that absence into [`Error::FormatterNotFound`].

use std::io;
use thiserror::Error;

/// Result type alias for stratapack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for formatter registration and use
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument was rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not allowed in the current lifecycle state
    ///
    /// Raised when registering into a resolver that is already frozen.
    /// This is a programming error and is never transient.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// No formatter is available for the named type
    #[error("No formatter registered for type {0}")]
    FormatterNotFound(&'static str),

    /// Serialization/deserialization error raised by a formatter
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error while reading or writing an encoded value
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a new invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }

    /// Create a new serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Error::SerializationError(msg.into())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
