//! Error types for the emitters.

use thiserror::Error;

use crate::dialect::Dialect;

/// Errors that can occur while emitting a program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The dialect has no way to express an operation.
    #[error("{dialect} cannot express '{op}'")]
    UnsupportedOperation {
        /// Target dialect.
        dialect: Dialect,
        /// Token of the operation.
        op: String,
    },

    /// The dialect name is not known.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for emit operations.
pub type EmitResult<T> = Result<T, EmitError>;
